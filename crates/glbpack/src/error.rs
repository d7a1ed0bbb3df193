//! Error types for glbpack.

use thiserror::Error;

/// Result type for packing operations.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packing a scene.
///
/// Every variant is terminal for the run: the first error aborts the
/// remaining work and no output file is written.
#[derive(Debug, Error)]
pub enum PackError {
    /// Input path does not carry the `.gltf` extension.
    #[error("file specified does not have the .gltf extension: {0}")]
    InputExtension(String),

    /// Data URI that is not of the `data:<type>;base64,<payload>` form.
    #[error("unsupported data URI: {0}")]
    UnsupportedDataUri(String),

    /// Buffer declares a `type` other than `arraybuffer`.
    #[error("buffer type {kind:?} not supported: {id}")]
    UnsupportedBufferType {
        /// ID of the offending buffer.
        id: String,
        /// The declared type.
        kind: String,
    },

    /// BufferView references a buffer ID that does not exist.
    #[error("buffer ID reference not found: {0}")]
    DanglingBufferReference(String),

    /// Body region grew past the container format's u32 length ceiling.
    #[error("body length exceeds the 4 GiB container limit")]
    BodyTooLarge,

    /// Scene document does not have the shape the packer relies on.
    #[error("invalid scene document: {0}")]
    InvalidDocument(String),

    /// I/O error reading a resource or writing the output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input document.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 decoding error in a data URI payload.
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A `text/plain` resource whose bytes are not valid UTF-8.
    #[error("text resource is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
