pub mod analyze_video;

pub use analyze_video::analyze_video;
