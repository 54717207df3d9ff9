//! The minimal host the blocks run in: ports, buffers, and a single-threaded runner.
pub mod block;
pub mod buffer;
pub mod buffer_manager;
pub mod feeder;
pub mod port;
pub mod topology;

pub use block::*;
pub use buffer::*;
pub use buffer_manager::*;
pub use feeder::*;
pub use port::*;
pub use topology::*;
