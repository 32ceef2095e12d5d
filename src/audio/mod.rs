pub mod interp;
pub mod ring_buffer;

pub use interp::{cubic, lerp, read_fractional, InterpolationMode};
pub use ring_buffer::RingBuffer;
