// Frame domain: sensor frame remapping onto the fixed-size screen buffer.

pub mod buffer;
pub mod error;
pub mod remap;
pub mod types;

pub use buffer::DestinationBuffer;
pub use remap::remap;
pub use types::{Color, ScreenSize, SourceFrame};
