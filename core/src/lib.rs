pub mod config;
pub mod interrupts;
pub mod model;
pub mod video;

pub use config::{VideoCoreConfig, VideoCoreConfigBuilder};
pub use interrupts::InterruptFlags;
pub use model::GameModel;
pub use video::host::VideoHost;
pub use video::oam::{AttributeFlags, Oam, SpriteEntry};
pub use video::palette::PaletteCursor;
pub use video::registers::{LcdControl, LcdStatus, IO_REGISTERS_LEN};
pub use video::renderer::{DummyRenderer, Renderer, TileCache};
pub use video::serialize::{SnapshotError, SNAPSHOT_LEN};
pub use video::vram::Vram;
pub use video::{Mode, VideoCore};
