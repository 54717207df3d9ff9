//! Blocks which put data into a topology and take it back out, for tests and examples.
use std::sync::{Arc, Mutex};

use crate::dtype::{DType, Element};
use crate::framework::block::{Block, BlockDescriptor, WorkIo};

/// Emits a fixed sequence of elements, then nothing.
pub struct FeederSource {
    descriptor: BlockDescriptor,
    data: Vec<u8>,
    offset: usize,
    elements_per_work: usize,
}

impl FeederSource {
    pub fn new<T: Element>(data: &[T]) -> FeederSource {
        FeederSource {
            descriptor: BlockDescriptor::new("/test/feeder").output(DType::of::<T>()),
            data: bytemuck::cast_slice(data).to_vec(),
            offset: 0,
            elements_per_work: usize::MAX,
        }
    }

    /// Emit at most `elements` per call to work, to exercise blocks with short buffers.
    pub fn with_elements_per_work(mut self, elements: usize) -> FeederSource {
        self.elements_per_work = elements.max(1);
        self
    }
}

impl Block for FeederSource {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([], [out], _) = io.split::<0, 1>();
        let size = out.dtype().size();
        let remaining = (self.data.len() - self.offset) / size;
        let n = remaining.min(out.elements()).min(self.elements_per_work);
        if n == 0 {
            return;
        }

        let bytes = n * size;
        out.bytes_mut()[..bytes].copy_from_slice(&self.data[self.offset..self.offset + bytes]);
        out.produce(n);
        self.offset += bytes;
    }
}

/// Shared view of what a [CollectorSink] has received.
#[derive(Clone, Debug, Default)]
pub struct CollectorHandle {
    received: Arc<Mutex<Vec<u8>>>,
}

impl CollectorHandle {
    pub fn bytes(&self) -> Vec<u8> {
        self.received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Everything received so far, as `T`.
    pub fn elements<T: Element>(&self) -> Vec<T> {
        self.bytes()
            .chunks_exact(std::mem::size_of::<T>())
            .map(bytemuck::pod_read_unaligned)
            .collect()
    }
}

/// Records everything which arrives on its single input.
pub struct CollectorSink {
    descriptor: BlockDescriptor,
    handle: CollectorHandle,
}

impl CollectorSink {
    pub fn new(dtype: DType) -> (CollectorSink, CollectorHandle) {
        let handle = CollectorHandle::default();
        let sink = CollectorSink {
            descriptor: BlockDescriptor::new("/test/collector").input(dtype),
            handle: handle.clone(),
        };
        (sink, handle)
    }
}

impl Block for CollectorSink {
    fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    fn work(&mut self, io: &mut WorkIo<'_>) {
        let ([input], [], _) = io.split::<1, 0>();
        let n = input.elements();
        if n == 0 {
            return;
        }

        let bytes = n * input.dtype().size();
        self.handle
            .received
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend_from_slice(&input.bytes()[..bytes]);
        input.consume(n);
    }
}
