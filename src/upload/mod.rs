//! Video upload to the remote inference service.
//!
//! One POST per call, one multipart part named `video`, one JSON object back.
//! No retries: every failure is terminal for that call and is reported as an
//! `UploadError` the caller can show and retry manually.

pub mod client;
pub mod multipart;
pub mod transport;

pub use client::*;
pub use multipart::*;
pub use transport::*;

use thiserror::Error;

/// Top-level fields of the service's JSON object response.
pub type RawFields = serde_json::Map<String, serde_json::Value>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Invalid endpoint URL: {0}")]
    BadUrl(String),

    #[error("Cannot load video file {path}: {reason}")]
    CannotLoadFile { path: String, reason: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected server response (status {status})")]
    BadServerResponse { status: u16 },

    #[error("Cannot parse server response: {0}")]
    CannotParseResponse(String),
}

impl UploadError {
    /// Stable machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadUrl(_) => "bad_url",
            Self::CannotLoadFile { .. } => "cannot_load_file",
            Self::Transport(_) => "transport",
            Self::BadServerResponse { .. } => "bad_server_response",
            Self::CannotParseResponse(_) => "cannot_parse_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let errors = [
            UploadError::BadUrl("x".into()),
            UploadError::CannotLoadFile {
                path: "a.mp4".into(),
                reason: "missing".into(),
            },
            UploadError::Transport("refused".into()),
            UploadError::BadServerResponse { status: 500 },
            UploadError::CannotParseResponse("eof".into()),
        ];
        let mut kinds: Vec<_> = errors.iter().map(UploadError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn display_names_the_failure() {
        let err = UploadError::BadServerResponse { status: 503 };
        assert_eq!(err.to_string(), "Unexpected server response (status 503)");

        let err = UploadError::CannotLoadFile {
            path: "/tmp/v.mp4".into(),
            reason: "No such file or directory".into(),
        };
        assert!(err.to_string().contains("/tmp/v.mp4"));
    }
}
