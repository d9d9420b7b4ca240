pub mod decoder;
pub mod encoder;
pub mod lsb_codec;
pub mod overlay;

pub use lsb_codec::{LsbCodec, Watermarked};
pub use overlay::{render_text, OverlayOptions, Position};
