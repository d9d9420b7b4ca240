mod embed;
mod recover;
mod unveil_raw;

pub use embed::*;
pub use recover::*;
pub use unveil_raw::*;
