use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegmarkError {
    /// Represents a missing or empty secret key where a keyed variant needs one
    #[error("A secret key is required for this watermark variant")]
    MissingSecretKey,

    /// Represents a payload that does not fit into the carrier, one bit is stored per pixel
    #[error(
        "Capacity Error: The watermark payload needs {required} pixels but the carrier image only has {available}"
    )]
    CapacityExceeded { required: usize, available: usize },

    /// Represents a broken or undecodable carrier image. For example, a truncated PNG file
    #[error("Image media could not be decoded")]
    ImageDecodeError(#[source] image::ImageError),

    /// Represents an unsupported carrier media. For example, a Movie file is not supported
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a watermark variant identifier that is not known
    #[error("Unknown watermark variant: {0}")]
    UnknownVariant(String),

    /// Represents a visible watermark request without any text to render
    #[error("Watermark text is required for visible watermarking")]
    MissingWatermarkText,

    /// Represents an overlay opacity outside of (0, 1]
    #[error("Overlay opacity must be within (0, 1], got {0}")]
    InvalidOpacity(f32),

    /// Represents an overlay position identifier that is not known
    #[error("Unknown overlay position: {0}")]
    UnknownPosition(String),

    /// Represents a frequency domain variant requested without a transform service
    #[error("No transform service configured for variant {0}")]
    TransformServiceUnavailable(String),

    /// Represents a failure reported by the external transform service
    #[error("Transform service failed: {0}")]
    TransformServiceError(String),

    /// Represents a failure while serializing the watermark record
    #[error("Watermark record could not be serialized")]
    PayloadSerialization(#[from] serde_json::Error),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,
}
