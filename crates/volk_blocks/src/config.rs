//! Constants which control buffer sizing and block defaults.

/// Bytes in one buffer of a port's slab.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Buffers per port.  A port's storage is `DEFAULT_BUFFER_SIZE * DEFAULT_NUM_BUFFERS` bytes.
pub const DEFAULT_NUM_BUFFERS: usize = 4;

/// How close to 1 the square distance scalar must be for the unscaled kernel to be used instead.
pub const SQUARE_DIST_EPSILON: f32 = 1e-6;

/// Getter name for blocks whose only parameter is a plain scalar.
pub const DEFAULT_SCALAR_GETTER: &str = "scalar";

/// Setter name for blocks whose only parameter is a plain scalar.
pub const DEFAULT_SCALAR_SETTER: &str = "setScalar";

/// Every block path starts with this.
pub const PATH_PREFIX: &str = "/volk/";
