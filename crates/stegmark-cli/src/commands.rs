pub mod embed;
pub mod recover;
pub mod unveil_raw;
