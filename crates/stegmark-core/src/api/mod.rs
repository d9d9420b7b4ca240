//! Builder style entry points working on image files.

pub mod embed;
pub mod recover;
mod shared;
pub mod unveil_raw;

pub use shared::KeyInput;
