//! Error taxonomy for the editor.
//!
//! Only construction and pipeline failures are errors. Interactive paths
//! (no selection, cancelled prompt, missing active field) are soft failures
//! and are expressed as `Option`/no-op instead.

use miette::Diagnostic;
use smol_str::SmolStr;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum EditorError {
    /// The same editor field id was registered twice.
    #[error("editor field `{0}` is registered more than once")]
    #[diagnostic(code(weft::duplicate_field))]
    DuplicateField(SmolStr),

    /// No element with the requested id exists in the document.
    #[error("no element with id `{0}`")]
    #[diagnostic(code(weft::missing_element))]
    MissingElement(SmolStr),

    /// Image quality option outside the percentage range.
    #[error("image quality {0} is outside 0..=100")]
    #[diagnostic(
        code(weft::config::image_quality),
        help("image_quality is a percentage; the default is 80")
    )]
    QualityOutOfRange(u32),

    /// A source that is not a base64 `data:` URI.
    #[error("invalid data URI: {0}")]
    #[diagnostic(code(weft::image::data_uri))]
    InvalidDataUri(String),

    /// The encoder has no support for the requested MIME type.
    #[error("unsupported image type `{0}`")]
    #[diagnostic(code(weft::image::mime))]
    UnsupportedMime(String),

    /// The source bytes could not be decoded into a bitmap.
    #[error("image decode failed: {0}")]
    #[diagnostic(code(weft::image::decode))]
    Decode(String),

    /// The bitmap could not be re-encoded.
    #[error("image encode failed: {0}")]
    #[diagnostic(code(weft::image::encode))]
    Encode(String),

    /// A DOM call threw. Carries the stringified JS value.
    #[error("dom error: {0}")]
    #[diagnostic(code(weft::dom))]
    Dom(String),
}

impl EditorError {
    pub fn missing(id: impl Into<SmolStr>) -> Self {
        Self::MissingElement(id.into())
    }
}
