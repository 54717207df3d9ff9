use crate::dtype::DType;
use crate::framework::block::{BoxedBlock, Direction, WorkInfo, WorkIo};
use crate::framework::buffer_manager::{BufferManager, BufferManagerArgs};
use crate::framework::port::{InputPort, OutputPort, PortDescriptor, PortName};
use crate::value::Value;
use crate::Result;

#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("no block with id {0}")]
    UnknownBlock(usize),

    #[error("{path} has no {direction} port {port}")]
    UnknownPort {
        path: &'static str,
        direction: &'static str,
        port: PortName,
    },

    #[error("cannot connect {src} output to {dst} input")]
    DTypeMismatch { src: DType, dst: DType },

    #[error("input {port} of {path} is already connected")]
    AlreadyConnected { path: &'static str, port: PortName },
}

/// Handle to a block added to a [Topology].
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BlockId(usize);

struct Node {
    block: BoxedBlock,
    inputs: Vec<InputPort>,
    outputs: Vec<OutputPort>,
}

impl Node {
    fn activity(&self) -> usize {
        self.inputs.iter().map(|p| p.total_consumed()).sum::<usize>()
            + self.outputs.iter().map(|p| p.total_produced()).sum::<usize>()
    }
}

#[derive(Copy, Clone, Debug)]
struct Edge {
    src: (usize, usize),
    dst: (usize, usize),
}

/// Runs blocks on the current thread, moving data along connections until nothing more can happen.
pub struct Topology {
    args: BufferManagerArgs,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new(BufferManagerArgs::default())
    }
}

fn storage_for(
    block: &BoxedBlock,
    direction: Direction,
    port: usize,
    args: &BufferManagerArgs,
) -> Result<Option<crate::framework::SharedBuffer>> {
    Ok(block
        .buffer_manager(direction, port, args)?
        .map(BufferManager::into_slab))
}

fn find_port(ports: &[PortDescriptor], name: &PortName) -> Option<usize> {
    ports.iter().position(|p| p.name == *name)
}

impl Topology {
    pub fn new(args: BufferManagerArgs) -> Topology {
        Topology {
            args,
            nodes: vec![],
            edges: vec![],
        }
    }

    pub fn add(&mut self, block: BoxedBlock) -> Result<BlockId> {
        let mut inputs = Vec::with_capacity(block.inputs().len());
        for (i, desc) in block.inputs().iter().enumerate() {
            let storage = storage_for(&block, Direction::Input, i, &self.args)?;
            inputs.push(InputPort::new(desc.name.clone(), desc.dtype, storage));
        }

        let mut outputs = Vec::with_capacity(block.outputs().len());
        for (i, desc) in block.outputs().iter().enumerate() {
            let storage = storage_for(&block, Direction::Output, i, &self.args)?;
            outputs.push(OutputPort::new(desc.name.clone(), desc.dtype, storage));
        }

        log::trace!("Adding {} to topology as block {}", block.path(), self.nodes.len());
        self.nodes.push(Node {
            block,
            inputs,
            outputs,
        });
        Ok(BlockId(self.nodes.len() - 1))
    }

    fn node(&self, id: BlockId) -> Result<&Node> {
        Ok(self.nodes.get(id.0).ok_or(TopologyError::UnknownBlock(id.0))?)
    }

    /// Connect an output of `src` to an input of `dst`.
    ///
    /// Outputs may fan out to any number of inputs.  Each input accepts one connection.
    pub fn connect(
        &mut self,
        src: BlockId,
        src_port: impl Into<PortName>,
        dst: BlockId,
        dst_port: impl Into<PortName>,
    ) -> Result<()> {
        let (src_port, dst_port) = (src_port.into(), dst_port.into());
        let src_block = &self.node(src)?.block;
        let dst_block = &self.node(dst)?.block;

        let out_index = find_port(src_block.outputs(), &src_port).ok_or_else(|| TopologyError::UnknownPort {
            path: src_block.path(),
            direction: "output",
            port: src_port.clone(),
        })?;
        let in_index = find_port(dst_block.inputs(), &dst_port).ok_or_else(|| TopologyError::UnknownPort {
            path: dst_block.path(),
            direction: "input",
            port: dst_port.clone(),
        })?;

        let src_dtype = src_block.outputs()[out_index].dtype;
        let dst_dtype = dst_block.inputs()[in_index].dtype;
        if src_dtype != dst_dtype {
            return Err(TopologyError::DTypeMismatch {
                src: src_dtype,
                dst: dst_dtype,
            }
            .into());
        }

        if self.edges.iter().any(|e| e.dst == (dst.0, in_index)) {
            return Err(TopologyError::AlreadyConnected {
                path: dst_block.path(),
                port: dst_port,
            }
            .into());
        }

        self.edges.push(Edge {
            src: (src.0, out_index),
            dst: (dst.0, in_index),
        });
        Ok(())
    }

    /// Invoke a control-plane call on a block.
    pub fn call(&mut self, id: BlockId, name: &str, args: &[Value]) -> Result<Value> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(TopologyError::UnknownBlock(id.0))?;
        node.block.call(name, args)
    }

    /// Work every block once, then move data downstream.  Returns whether anything happened.
    fn step(&mut self) -> bool {
        let mut progress = false;

        for node in self.nodes.iter_mut() {
            let before = node.activity();
            let info = WorkInfo::compute(&node.inputs, &node.outputs);
            let mut io = WorkIo {
                inputs: &mut node.inputs,
                outputs: &mut node.outputs,
                info,
            };
            node.block.work(&mut io);
            progress |= node.activity() != before;
        }

        for src in 0..self.nodes.len() {
            progress |= self.deliver_from(src);
        }

        for node in self.nodes.iter_mut() {
            node.inputs.iter_mut().for_each(InputPort::compact);
        }

        progress
    }

    /// Step until no block can make progress.
    pub fn run(&mut self) {
        while self.step() {}
    }

    fn deliver_from(&mut self, src: usize) -> bool {
        let mut outputs = std::mem::take(&mut self.nodes[src].outputs);
        let mut progress = false;

        for (port_index, port) in outputs.iter_mut().enumerate() {
            let dsts = self
                .edges
                .iter()
                .filter(|e| e.src == (src, port_index))
                .map(|e| e.dst)
                .collect::<smallvec::SmallVec<[(usize, usize); 4]>>();

            while let Some(chunk) = port.take_posted() {
                for (node, input) in dsts.iter().copied() {
                    self.nodes[node].inputs[input].push_chunk(chunk.clone());
                }
                progress = true;
            }

            let pending = port.pending_bytes().len();
            if pending == 0 {
                continue;
            }

            // Fan-out is limited by the fullest downstream input.  Unconnected outputs discard.
            let elem = port.dtype().size();
            let space = dsts
                .iter()
                .map(|(node, input)| self.nodes[*node].inputs[*input].space())
                .min()
                .unwrap_or(pending);
            let bytes = (pending.min(space) / elem) * elem;
            if bytes == 0 {
                continue;
            }

            for (node, input) in dsts.iter().copied() {
                self.nodes[node].inputs[input].push_bytes(&port.pending_bytes()[..bytes]);
            }
            port.drain_pending(bytes);
            progress = true;
        }

        self.nodes[src].outputs = outputs;
        progress
    }
}
