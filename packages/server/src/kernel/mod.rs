//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod gemini;
pub mod test_dependencies;
pub mod traits;
pub mod youtube;

pub use deps::ServerDeps;
pub use gemini::{VertexTextGenerator, GEMINI_2_5_PRO};
pub use test_dependencies::TestDependencies;
pub use traits::*;
pub use youtube::YouTubeVideoPlatform;
