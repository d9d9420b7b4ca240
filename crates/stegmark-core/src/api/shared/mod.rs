mod key_input;

pub use key_input::*;
