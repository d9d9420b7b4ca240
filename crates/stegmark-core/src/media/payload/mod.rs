pub mod framer;
mod record;

pub use framer::{BitStream, Unframed};
pub use record::*;
