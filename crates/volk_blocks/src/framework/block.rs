use smallvec::SmallVec;

use crate::dtype::DType;
use crate::framework::buffer_manager::{generic_allocator, AllocateFn, BufferManager, BufferManagerArgs};
use crate::framework::port::{InputPort, OutputPort, PortDescriptor, PortName};
use crate::value::{CallError, Value};
use crate::Result;

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::IsVariant)]
pub enum Direction {
    Input,
    Output,
}

/// What a block is: its path, its ports, and where its port storage comes from.
#[derive(Clone)]
pub struct BlockDescriptor {
    pub path: &'static str,
    pub inputs: SmallVec<[PortDescriptor; 2]>,
    pub outputs: SmallVec<[PortDescriptor; 2]>,
    pub allocator: AllocateFn,
}

impl BlockDescriptor {
    pub fn new(path: &'static str) -> BlockDescriptor {
        BlockDescriptor {
            path,
            inputs: Default::default(),
            outputs: Default::default(),
            allocator: generic_allocator,
        }
    }

    /// Add the next indexed input.
    pub fn input(mut self, dtype: DType) -> Self {
        let index = self.inputs.iter().filter(|p| p.name.is_indexed()).count();
        self.inputs.push(PortDescriptor {
            name: PortName::Index(index),
            dtype,
        });
        self
    }

    /// Add the next indexed output.
    pub fn output(mut self, dtype: DType) -> Self {
        let index = self.outputs.iter().filter(|p| p.name.is_indexed()).count();
        self.outputs.push(PortDescriptor {
            name: PortName::Index(index),
            dtype,
        });
        self
    }

    pub fn named_input(mut self, name: &'static str, dtype: DType) -> Self {
        self.inputs.push(PortDescriptor {
            name: name.into(),
            dtype,
        });
        self
    }

    pub fn named_output(mut self, name: &'static str, dtype: DType) -> Self {
        self.outputs.push(PortDescriptor {
            name: name.into(),
            dtype,
        });
        self
    }

    pub fn with_allocator(mut self, allocator: AllocateFn) -> Self {
        self.allocator = allocator;
        self
    }
}

impl std::fmt::Debug for BlockDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockDescriptor")
            .field("path", &self.path)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .finish_non_exhaustive()
    }
}

/// Element counts available to one call of [Block::work].
///
/// The plain minimums only look at indexed ports; the `all` minimums look at every port.  A block without ports in some
/// category sees `usize::MAX` for it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct WorkInfo {
    pub min_in_elements: usize,
    pub min_out_elements: usize,
    pub min_elements: usize,
    pub min_all_in_elements: usize,
    pub min_all_out_elements: usize,
    pub min_all_elements: usize,
}

impl WorkInfo {
    pub(crate) fn compute(inputs: &[InputPort], outputs: &[OutputPort]) -> WorkInfo {
        fn min_of(iter: impl Iterator<Item = usize>) -> usize {
            iter.min().unwrap_or(usize::MAX)
        }

        let min_in_elements = min_of(inputs.iter().filter(|p| p.name().is_indexed()).map(|p| p.elements()));
        let min_out_elements = min_of(outputs.iter().filter(|p| p.name().is_indexed()).map(|p| p.elements()));
        let min_all_in_elements = min_of(inputs.iter().map(|p| p.elements()));
        let min_all_out_elements = min_of(outputs.iter().map(|p| p.elements()));

        WorkInfo {
            min_in_elements,
            min_out_elements,
            min_elements: min_in_elements.min(min_out_elements),
            min_all_in_elements,
            min_all_out_elements,
            min_all_elements: min_all_in_elements.min(min_all_out_elements),
        }
    }
}

/// Everything a block may touch during one call of [Block::work].
///
/// Ports are in descriptor order.
pub struct WorkIo<'a> {
    pub inputs: &'a mut [InputPort],
    pub outputs: &'a mut [OutputPort],
    pub info: WorkInfo,
}

impl<'a> WorkIo<'a> {
    pub fn input(&mut self, name: impl Into<PortName>) -> Option<&mut InputPort> {
        let name = name.into();
        self.inputs.iter_mut().find(|p| *p.name() == name)
    }

    pub fn output(&mut self, name: impl Into<PortName>) -> Option<&mut OutputPort> {
        let name = name.into();
        self.outputs.iter_mut().find(|p| *p.name() == name)
    }

    /// Borrow every port at once, as fixed-size arrays.
    ///
    /// Panics if the block has a different number of ports; the topology builds ports from the descriptor, so this
    /// only happens when a block disagrees with itself.
    pub fn split<const I: usize, const O: usize>(
        &mut self,
    ) -> ([&mut InputPort; I], [&mut OutputPort; O], WorkInfo) {
        assert_eq!(self.inputs.len(), I, "Block has {} inputs, not {}", self.inputs.len(), I);
        assert_eq!(self.outputs.len(), O, "Block has {} outputs, not {}", self.outputs.len(), O);

        let mut inputs = self.inputs.iter_mut();
        let mut outputs = self.outputs.iter_mut();
        let inputs = std::array::from_fn(|_| inputs.next().unwrap_or_else(|| unreachable!()));
        let outputs = std::array::from_fn(|_| outputs.next().unwrap_or_else(|| unreachable!()));
        (inputs, outputs, self.info)
    }
}

/// A stream-processing block.
pub trait Block: Send {
    fn descriptor(&self) -> &BlockDescriptor;

    /// Process whatever is available.  Must not fail; a block which cannot progress returns without consuming or
    /// producing.
    fn work(&mut self, io: &mut WorkIo<'_>);

    /// Invoke a named call from the control plane.
    fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let _ = args;
        Err(CallError::UnknownCall {
            path: self.path().to_string(),
            call: name.to_string(),
        }
        .into())
    }

    /// Names accepted by [Block::call].
    fn calls(&self) -> Vec<&'static str> {
        vec![]
    }

    fn path(&self) -> &'static str {
        self.descriptor().path
    }

    fn inputs(&self) -> &[PortDescriptor] {
        &self.descriptor().inputs
    }

    fn outputs(&self) -> &[PortDescriptor] {
        &self.descriptor().outputs
    }

    /// The storage for one port, or `None` for a port which never holds data of its own.
    fn buffer_manager(
        &self,
        direction: Direction,
        port: usize,
        args: &BufferManagerArgs,
    ) -> Result<Option<BufferManager>> {
        let _ = (direction, port);
        BufferManager::new(*args, self.descriptor().allocator).map(Some)
    }
}

pub type BoxedBlock = Box<dyn Block>;
