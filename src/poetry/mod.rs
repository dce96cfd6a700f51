pub mod config;
pub mod segmenter;

pub use config::SegmenterConfig;
pub use segmenter::{segment, Segmenter};
