use std::path::Path;

use reqwest::Url;

use super::multipart::{upload_filename, MultipartBody, VIDEO_FIELD, VIDEO_MIME};
use super::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use super::{RawFields, UploadError};
use crate::config;

/// Uploads one local video per call and returns the service's JSON fields.
///
/// Holds no per-call state, so a single client can serve concurrent uploads.
pub struct UploadClient<T: HttpTransport = ReqwestTransport> {
    transport: T,
}

impl UploadClient<ReqwestTransport> {
    /// Client over the default reqwest transport.
    pub fn default_remote() -> Result<Self, UploadError> {
        Ok(Self::new(ReqwestTransport::new(
            config::UPLOAD_CONNECT_TIMEOUT_SECS,
        )?))
    }
}

impl<T: HttpTransport> UploadClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Upload `file` to `endpoint` as the `video` part of a multipart POST.
    ///
    /// The endpoint is validated and the file read before any network I/O,
    /// so `BadUrl` and `CannotLoadFile` never cost a request.
    pub async fn upload(&self, file: &Path, endpoint: &str) -> Result<RawFields, UploadError> {
        let url = parse_endpoint(endpoint)?;

        let data = tokio::fs::read(file)
            .await
            .map_err(|e| UploadError::CannotLoadFile {
                path: file.display().to_string(),
                reason: e.to_string(),
            })?;

        let filename = upload_filename(file);
        let body = MultipartBody::single_file(VIDEO_FIELD, &filename, VIDEO_MIME, &data);
        drop(data);

        tracing::info!(
            endpoint = %url,
            filename = %filename,
            body_bytes = body.len(),
            "Starting video upload"
        );

        let request = HttpRequest {
            url,
            content_type: body.content_type(),
            body: body.into_bytes(),
        };

        let response = self.transport.post(request).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Video upload failed");
        })?;

        let fields = interpret_response(response)?;
        tracing::info!(fields = fields.len(), "Video upload successful");
        Ok(fields)
    }
}

/// Accept only absolute http(s) URLs with a host.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, UploadError> {
    let url = Url::parse(endpoint).map_err(|e| UploadError::BadUrl(format!("{endpoint:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(UploadError::BadUrl(format!(
            "{endpoint:?}: expected an http(s) URL with a host"
        ))),
    }
}

/// Map a raw reply to the service's fields.
///
/// Only status 200 with a non-empty body counts as an answer; the body must
/// be a JSON object.
pub fn interpret_response(response: HttpResponse) -> Result<RawFields, UploadError> {
    if response.status != 200 || response.body.is_empty() {
        tracing::warn!(
            status = response.status,
            body_bytes = response.body.len(),
            "Inference service returned an unusable response"
        );
        return Err(UploadError::BadServerResponse {
            status: response.status,
        });
    }

    match serde_json::from_slice::<serde_json::Value>(&response.body) {
        Ok(serde_json::Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(UploadError::CannotParseResponse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(UploadError::CannotParseResponse(e.to_string())),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
