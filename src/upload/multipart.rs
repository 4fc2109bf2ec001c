//! Hand-built `multipart/form-data` body carrying a single file part.

use std::path::Path;

use uuid::Uuid;

/// Form field the inference service reads the video from.
pub const VIDEO_FIELD: &str = "video";

/// Content type declared for the uploaded part, whatever the container.
pub const VIDEO_MIME: &str = "video/mp4";

/// Filename sent when the path has no final component.
const FALLBACK_FILENAME: &str = "video.mp4";

/// A complete multipart body and the boundary that delimits it.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// Single-part body with a fresh random boundary.
    pub fn single_file(field: &str, filename: &str, mime: &str, data: &[u8]) -> Self {
        Self::with_boundary(&new_boundary(), field, filename, mime, data)
    }

    /// Single-part body with a caller-chosen boundary.
    ///
    /// Layout: `--B CRLF`, disposition and type headers, blank line, payload,
    /// `CRLF --B-- CRLF`.
    pub fn with_boundary(
        boundary: &str,
        field: &str,
        filename: &str,
        mime: &str,
        data: &[u8],
    ) -> Self {
        let head = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
             Content-Type: {mime}\r\n\r\n",
            escape_quoted(field),
            escape_quoted(filename),
        );
        let tail = format!("\r\n--{boundary}--\r\n");

        let mut bytes = Vec::with_capacity(head.len() + data.len() + tail.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(data);
        bytes.extend_from_slice(tail.as_bytes());

        Self {
            boundary: boundary.to_string(),
            bytes,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Exact body length in bytes, used for `Content-Length`.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Random per-request boundary token.
pub fn new_boundary() -> String {
    format!("Boundary-{}", Uuid::new_v4())
}

/// Final path component, as sent in the part's `filename` parameter.
pub fn upload_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// Quoted-string parameter values: no raw quotes, no line breaks.
fn escape_quoted(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .map(|c| if c == '"' { "%22".to_string() } else { c.to_string() })
        .collect()
}
