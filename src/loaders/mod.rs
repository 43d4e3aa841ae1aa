//! Document loaders
//!
//! Each loader turns the text of one XML document into its model. Loaders
//! never touch the filesystem; the registry reads files and hands them over.

pub mod font;
pub mod frame;
pub mod scene;
pub mod skeletal;

pub use font::parse_font;
pub use frame::parse_frame_animation;
pub use scene::{parse_scene, XSI_NAMESPACE};
pub use skeletal::parse_skeletal_animation;
