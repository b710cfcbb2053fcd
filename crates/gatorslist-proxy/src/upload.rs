use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::ProxyError;
use crate::relay::relay_create;
use crate::state::AppState;

/// Largest multipart body accepted for an image upload.
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Media types compare case-insensitively.
fn is_multipart(content_type: &str) -> bool {
    const MULTIPART: &str = "multipart/form-data";
    content_type
        .get(..MULTIPART.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(MULTIPART))
}

/// POST /api/upload: the multipart body is forwarded byte-for-byte with its
/// original Content-Type (boundary included); nothing is parsed here.
pub async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ProxyError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|ct| is_multipart(ct))
        .ok_or_else(|| ProxyError::Validation("Expected a multipart/form-data body".into()))?
        .to_string();

    let request = state
        .http
        .post(state.endpoint(&["upload"]))
        .header(header::CONTENT_TYPE, content_type)
        .body(body);

    relay_create(
        &state,
        request,
        StatusCode::CREATED,
        json!({ "error": "Upload failed" }),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipart_detection_ignores_case() {
        assert!(is_multipart("multipart/form-data; boundary=b"));
        assert!(is_multipart("Multipart/Form-Data; boundary=b"));
        assert!(!is_multipart("application/json"));
        assert!(!is_multipart("multi"));
    }
}
