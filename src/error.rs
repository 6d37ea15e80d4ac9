use thiserror::Error;

/// Errors arising from binary wire encoding and decoding.
///
/// All decode errors are fatal: the input is rejected as a whole, never
/// partially consumed into a best-effort value.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("input too short for {field}: need {need} bytes, got {got}")]
    TooShort {
        field: &'static str,
        need: usize,
        got: usize,
    },

    #[error("invalid boolean for {field} at offset {offset} (expected 0x00 or 0x01, got 0x{got:02X})")]
    InvalidBool {
        field: &'static str,
        offset: usize,
        got: u8,
    },

    #[error("invalid UTF-8 in {field}: {source}")]
    InvalidUtf8 {
        field: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("{field} too long for the wire ({len} bytes, max {max})")]
    StringTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("trailing bytes after {message}: {left} of {total} bytes unread")]
    TrailingBytes {
        message: &'static str,
        left: usize,
        total: usize,
    },
}

impl WireError {
    pub(crate) fn too_short(field: &'static str, need: usize, got: usize) -> Self {
        Self::TooShort { field, need, got }
    }
}

/// Errors arising from the document (JSON) channel.
///
/// Covers syntax errors, missing required keys, and mistyped values. Partial
/// parsing is never attempted.
#[derive(Debug, Error)]
#[error("document codec: {0}")]
pub struct DocumentError(#[from] serde_json::Error);

pub type Result<T> = std::result::Result<T, WireError>;
