pub mod fourcc;
pub mod riff;
pub mod view;

pub use fourcc::FourCc;
pub use riff::{Chunk, ChunkHeader, HEADER_SIZE};
pub use view::BinaryView;
