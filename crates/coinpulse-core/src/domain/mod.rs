pub mod asset;
pub mod sample;
pub mod timestamp;
pub mod window;

pub use asset::AssetId;
pub use sample::{Sample, Series};
pub use timestamp::UtcDateTime;
pub use window::TimeWindow;
