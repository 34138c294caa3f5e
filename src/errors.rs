use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A checksum was declared without saying which algorithm produced it.
    #[error("no checksum kind specified")]
    MissingChecksumKind,

    #[error("unsupported checksum kind <{0}>")]
    UnsupportedChecksumKind(String),

    #[error("invalid package pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("failed to fetch {location}: {message}")]
    FetchFailed { location: String, message: String },

    #[error("checksum doesn't match for {location}")]
    ChecksumMismatch { location: String },

    #[error("no usable mirror, tried {tried} location(s)")]
    NoUsableMirror {
        tried: usize,
        #[source]
        last_error: Option<Box<Error>>,
    },

    #[error("failed to load package source {source_name}: {message}")]
    SourceFailed {
        source_name: String,
        message: String,
    },
}
