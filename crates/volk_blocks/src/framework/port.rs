use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt::{self, Display};

use crate::dtype::{DType, Element};
use crate::framework::buffer::{BufferChunk, SharedBuffer};

/// Ports are either indexed (`0`, `1`, ...) or named (`"real"`, `"imag"`, ...).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PortName {
    Index(usize),
    Named(Cow<'static, str>),
}

impl PortName {
    pub fn is_indexed(&self) -> bool {
        matches!(self, PortName::Index(_))
    }
}

impl From<usize> for PortName {
    fn from(value: usize) -> Self {
        PortName::Index(value)
    }
}

impl From<&'static str> for PortName {
    fn from(value: &'static str) -> Self {
        PortName::Named(Cow::Borrowed(value))
    }
}

impl From<String> for PortName {
    fn from(value: String) -> Self {
        PortName::Named(Cow::Owned(value))
    }
}

impl Display for PortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortName::Index(i) => write!(f, "{i}"),
            PortName::Named(n) => write!(f, "{n}"),
        }
    }
}

/// The static description of one port of a block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PortDescriptor {
    pub name: PortName,
    pub dtype: DType,
}

fn whole_elements(bytes: usize, dtype: DType) -> usize {
    bytes / dtype.size()
}

/// The readable side of a connection.
///
/// Data arrives either copied into the port's own storage, or as chunks forwarded by reference from upstream.  Forwarded
/// chunks are read first, one at a time.
#[derive(Debug)]
pub struct InputPort {
    name: PortName,
    dtype: DType,
    storage: Option<SharedBuffer>,
    start: usize,
    end: usize,
    forwarded: VecDeque<BufferChunk>,
    total_consumed: usize,
}

impl InputPort {
    pub(crate) fn new(name: PortName, dtype: DType, storage: Option<SharedBuffer>) -> InputPort {
        InputPort {
            name,
            dtype,
            storage,
            start: 0,
            end: 0,
            forwarded: VecDeque::new(),
            total_consumed: 0,
        }
    }

    pub fn name(&self) -> &PortName {
        &self.name
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Readable bytes, as one contiguous run.
    pub fn bytes(&self) -> &[u8] {
        if let Some(front) = self.forwarded.front() {
            return front.as_bytes();
        }

        match self.storage.as_ref() {
            Some(s) => &s.as_bytes()[self.start..self.end],
            None => &[],
        }
    }

    /// Readable elements.
    pub fn elements(&self) -> usize {
        whole_elements(self.bytes().len(), self.dtype)
    }

    /// View the readable elements as `T`.
    ///
    /// Panics if `T` does not match this port's dtype.
    pub fn slice<T: Element>(&self) -> &[T] {
        assert!(
            self.dtype.matches::<T>(),
            "Input port {} carries {}, read as {:?}",
            self.name,
            self.dtype,
            T::KIND
        );
        let len = self.elements() * self.dtype.size();
        bytemuck::cast_slice(&self.bytes()[..len])
    }

    /// Mark `n` elements as read.
    pub fn consume(&mut self, n: usize) {
        assert!(
            n <= self.elements(),
            "Input port {} consumed {} of {} elements",
            self.name,
            n,
            self.elements()
        );
        let bytes = n * self.dtype.size();

        if let Some(front) = self.forwarded.front_mut() {
            front.advance(bytes);
            if front.len_bytes() == 0 {
                self.forwarded.pop_front();
            }
        } else {
            self.start += bytes;
        }
        self.total_consumed += n;
    }

    /// Take everything in the current readable run as a chunk, consuming it.
    ///
    /// The chunk shares memory with this port.  New data cannot be copied into the port while the chunk is alive.
    pub fn take_buffer(&mut self) -> Option<BufferChunk> {
        if let Some(front) = self.forwarded.pop_front() {
            self.total_consumed += front.elements();
            return Some(front);
        }

        let storage = self.storage.as_ref()?;
        let n = whole_elements(self.end - self.start, self.dtype);
        if n == 0 {
            return None;
        }

        let length = n * self.dtype.size();
        let chunk = BufferChunk::new(storage.clone(), self.start, length, self.dtype);
        self.start += length;
        self.total_consumed += n;
        Some(chunk)
    }

    pub(crate) fn total_consumed(&self) -> usize {
        self.total_consumed
    }

    /// Bytes that can be copied in right now.
    pub(crate) fn space(&self) -> usize {
        match self.storage.as_ref() {
            Some(s) if s.use_count() == 1 && self.forwarded.is_empty() => s.len() - self.end,
            _ => 0,
        }
    }

    /// Append bytes to the storage.  The caller checks [Self::space] first.
    pub(crate) fn push_bytes(&mut self, bytes: &[u8]) {
        let end = self.end;
        let storage = self
            .storage
            .as_mut()
            .and_then(|s| s.get_mut())
            .filter(|s| s.len() - end >= bytes.len());
        let Some(storage) = storage else {
            panic!("Input port {} cannot accept {} bytes", self.name, bytes.len());
        };

        storage[end..end + bytes.len()].copy_from_slice(bytes);
        self.end += bytes.len();
    }

    pub(crate) fn push_chunk(&mut self, chunk: BufferChunk) {
        self.forwarded.push_back(chunk);
    }

    /// Move unread data to the front of the storage.
    pub(crate) fn compact(&mut self) {
        if self.start == 0 {
            return;
        }

        if self.start == self.end {
            self.start = 0;
            self.end = 0;
            return;
        }

        let (start, end) = (self.start, self.end);
        if let Some(storage) = self.storage.as_mut().and_then(|s| s.get_mut()) {
            storage.copy_within(start..end, 0);
            self.end -= start;
            self.start = 0;
        }
    }
}

/// The writable side of a connection.
///
/// Produced elements stay at the front of the port's storage until the topology delivers them.  Chunks posted with
/// [OutputPort::post_buffer] bypass the storage entirely.
#[derive(Debug)]
pub struct OutputPort {
    name: PortName,
    dtype: DType,
    storage: Option<SharedBuffer>,
    pending: usize,
    posted: VecDeque<BufferChunk>,
    total_produced: usize,
}

impl OutputPort {
    pub(crate) fn new(name: PortName, dtype: DType, storage: Option<SharedBuffer>) -> OutputPort {
        OutputPort {
            name,
            dtype,
            storage,
            pending: 0,
            posted: VecDeque::new(),
            total_produced: 0,
        }
    }

    pub fn name(&self) -> &PortName {
        &self.name
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Free space, in elements.
    pub fn elements(&self) -> usize {
        match self.storage.as_ref() {
            Some(s) if s.use_count() == 1 => whole_elements(s.len() - self.pending, self.dtype),
            _ => 0,
        }
    }

    /// The free space, as bytes.  Empty if the storage is shared or absent.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        let free = self.elements() * self.dtype.size();
        let pending = self.pending;
        match self.storage.as_mut().and_then(|s| s.get_mut()) {
            Some(s) => &mut s[pending..pending + free],
            None => &mut [],
        }
    }

    /// The free space as `T`.
    ///
    /// Panics if `T` does not match this port's dtype.
    pub fn slice_mut<T: Element>(&mut self) -> &mut [T] {
        assert!(
            self.dtype.matches::<T>(),
            "Output port {} carries {}, written as {:?}",
            self.name,
            self.dtype,
            T::KIND
        );
        bytemuck::cast_slice_mut(self.bytes_mut())
    }

    /// Commit `n` elements written through [Self::slice_mut].
    pub fn produce(&mut self, n: usize) {
        assert!(
            n <= self.elements(),
            "Output port {} produced {} elements with space for {}",
            self.name,
            n,
            self.elements()
        );
        self.pending += n * self.dtype.size();
        self.total_produced += n;
    }

    /// Forward a chunk downstream without copying it.
    pub fn post_buffer(&mut self, chunk: BufferChunk) {
        self.total_produced += chunk.elements();
        self.posted.push_back(chunk);
    }

    pub(crate) fn total_produced(&self) -> usize {
        self.total_produced
    }

    pub(crate) fn pending_bytes(&self) -> &[u8] {
        match self.storage.as_ref() {
            Some(s) => &s.as_bytes()[..self.pending],
            None => &[],
        }
    }

    pub(crate) fn take_posted(&mut self) -> Option<BufferChunk> {
        self.posted.pop_front()
    }

    /// Forget the first `bytes` delivered bytes, shifting the rest down.
    pub(crate) fn drain_pending(&mut self, bytes: usize) {
        let pending = self.pending;
        if let Some(storage) = self.storage.as_mut().and_then(|s| s.get_mut()) {
            storage.copy_within(bytes..pending, 0);
        }
        self.pending -= bytes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::framework::buffer_manager::{generic_allocator, BufferManagerArgs};

    fn storage(bytes: usize) -> SharedBuffer {
        generic_allocator(&BufferManagerArgs {
            buffer_size: bytes,
            num_buffers: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_input_consume_and_compact() {
        let mut port = InputPort::new(PortName::Index(0), DType::of::<f32>(), Some(storage(16)));
        assert_eq!(port.space(), 16);

        port.push_bytes(bytemuck::cast_slice(&[1.0f32, 2.0, 3.0]));
        assert_eq!(port.slice::<f32>(), &[1.0, 2.0, 3.0]);

        port.consume(2);
        assert_eq!(port.slice::<f32>(), &[3.0]);
        assert_eq!(port.space(), 4);

        port.compact();
        assert_eq!(port.slice::<f32>(), &[3.0]);
        assert_eq!(port.space(), 12);
        assert_eq!(port.total_consumed(), 2);
    }

    #[test]
    fn test_take_buffer_blocks_writes_until_dropped() {
        let mut port = InputPort::new(PortName::Index(0), DType::of::<u16>(), Some(storage(8)));
        port.push_bytes(bytemuck::cast_slice(&[5u16, 6]));

        let chunk = port.take_buffer().unwrap();
        assert_eq!(chunk.as_slice::<u16>(), &[5, 6]);
        assert_eq!(port.elements(), 0);
        assert_eq!(port.space(), 0);

        drop(chunk);
        port.compact();
        assert_eq!(port.space(), 8);
    }

    #[test]
    fn test_forwarded_chunks_read_first() {
        let mut port = InputPort::new(PortName::Index(0), DType::of::<u16>(), Some(storage(8)));
        let mut upstream = InputPort::new(PortName::Index(0), DType::of::<u16>(), Some(storage(8)));
        upstream.push_bytes(bytemuck::cast_slice(&[1u16, 2, 3]));

        port.push_chunk(upstream.take_buffer().unwrap());
        assert_eq!(port.slice::<u16>(), &[1, 2, 3]);
        port.consume(3);
        assert_eq!(port.elements(), 0);
    }

    #[test]
    fn test_output_produce_and_drain() {
        let mut port = OutputPort::new("real".into(), DType::of::<i16>(), Some(storage(8)));
        assert_eq!(port.elements(), 4);

        port.slice_mut::<i16>()[..3].copy_from_slice(&[7, 8, 9]);
        port.produce(3);
        assert_eq!(port.elements(), 1);
        assert_eq!(port.pending_bytes(), bytemuck::cast_slice::<i16, u8>(&[7, 8, 9]));

        port.drain_pending(4);
        assert_eq!(port.pending_bytes(), bytemuck::cast_slice::<i16, u8>(&[9]));
        assert_eq!(port.elements(), 3);
    }

    #[test]
    #[should_panic]
    fn test_overproduce_panics() {
        let mut port = OutputPort::new(PortName::Index(0), DType::of::<f32>(), Some(storage(8)));
        port.produce(3);
    }

    #[test]
    #[should_panic]
    fn test_wrong_type_panics() {
        let port = InputPort::new(PortName::Index(0), DType::of::<f32>(), Some(storage(8)));
        port.slice::<f64>();
    }
}
