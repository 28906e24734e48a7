//! Error types for the IEC 60870-5-101 link layer.

use thiserror::Error;

/// Result type alias for IEC 101 operations.
pub type Result<T> = std::result::Result<T, Iec101Error>;

/// Outcome of a single decode attempt.
///
/// Every call to [`FrameCodec::decode`](crate::codec::FrameCodec::decode)
/// ends in exactly one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameParseErr {
    /// A complete, valid frame was decoded.
    NoError,
    /// The buffer is shorter than the frame its header announces.
    ///
    /// Nothing was consumed; retry with a longer buffer for the same frame.
    #[default]
    NeedMoreData,
    /// A start delimiter, repeated start byte or terminator is wrong.
    BadFormat,
    /// The length bytes disagree or the checksum does not match.
    CheckError,
}

impl FrameParseErr {
    /// Check if the decode attempt produced a frame.
    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::NoError)
    }

    /// Check if retrying with more bytes can change the outcome.
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NeedMoreData)
    }
}

impl std::fmt::Display for FrameParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::NoError => "no error",
            Self::NeedMoreData => "need more data",
            Self::BadFormat => "bad frame format",
            Self::CheckError => "length or checksum mismatch",
        };
        f.write_str(text)
    }
}

/// IEC 60870-5-101 link layer error types.
#[derive(Debug, Error)]
pub enum Iec101Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame rejected by the decoder
    #[error("Invalid frame: {0}")]
    InvalidFrame(FrameParseErr),

    /// Function code not defined for the station role
    #[error("Unknown function code: {0}")]
    UnknownFunctionCode(u8),

    /// User data does not fit the one-byte length field
    #[error("User data too large: {len} bytes (max {max})")]
    UserDataTooLarge { len: usize, max: usize },

    /// Link address does not fit the configured address field
    #[error("Link address {address} out of range (max {max})")]
    AddressOutOfRange { address: u16, max: u16 },
}

impl Iec101Error {
    /// Check if this error came from a malformed or corrupted frame.
    pub fn is_frame_error(&self) -> bool {
        matches!(self, Self::InvalidFrame(_))
    }
}

impl From<FrameParseErr> for Iec101Error {
    fn from(err: FrameParseErr) -> Self {
        Self::InvalidFrame(err)
    }
}
