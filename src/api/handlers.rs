//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::projector::Projector;

use super::server::AppState;

/// Content type of `.xlsx` downloads
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Multipart field carrying the upload
pub const UPLOAD_FIELD: &str = "file";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "jsonsheet API Server".to_string(),
        version: state.version.clone(),
        description: "Convert JSON documents into Excel workbooks".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new(
                "/api/v1/convert",
                "POST",
                "Upload a JSON file (multipart field 'file'), receive an .xlsx workbook",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec!["convert".to_string()],
    }))
}

/// A file taken from a multipart upload
#[derive(Debug)]
pub struct Upload {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// POST /api/v1/convert - Convert an uploaded JSON file to Excel
pub async fn convert(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let upload = match read_upload(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return error_response(StatusCode::BAD_REQUEST, "JSON file is required"),
        Err((status, message)) => return error_response(status, message),
    };

    let file_name = download_file_name(upload.file_name.as_deref());
    info!(
        "Converting upload ({} bytes) to {}",
        upload.bytes.len(),
        file_name
    );

    let projector = Projector::new(state.options.clone());
    let bytes = upload.bytes;
    let job = tokio::task::spawn_blocking(move || projector.project(&bytes));

    match tokio::time::timeout(state.timeout, job).await {
        Ok(Ok(Ok(buffer))) => xlsx_response(&file_name, buffer),
        Ok(Ok(Err(e))) => {
            let status = if e.is_input_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_response(status, e.to_string())
        }
        Ok(Err(join_error)) => {
            warn!("Conversion task failed: {}", join_error);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Conversion task failed")
        }
        Err(_) => {
            warn!("Conversion exceeded {:?}", state.timeout);
            error_response(StatusCode::GATEWAY_TIMEOUT, "Conversion timed out")
        }
    }
}

/// Pull the `file` field out of a multipart body, skipping any other fields
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, (StatusCode, String)> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| (e.status(), e.body_text()))?;
        let Some(field) = field else {
            return Ok(None);
        };
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (e.status(), e.body_text()))?;
        return Ok(Some(Upload { file_name, bytes }));
    }
}

/// `<upload stem>.xlsx`, restricted to characters safe in a header value
pub fn download_file_name(original: Option<&str>) -> String {
    let original = original.filter(|s| !s.is_empty()).unwrap_or("output.json");
    let base = match original.rfind('.') {
        Some(idx) if idx > 0 => &original[..idx],
        _ => original,
    };
    let safe: String = base
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.xlsx", safe)
}

fn xlsx_response(file_name: &str, buffer: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        buffer,
    )
        .into_response()
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::err(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_file_name_replaces_extension() {
        assert_eq!(download_file_name(Some("company.json")), "company.xlsx");
        assert_eq!(download_file_name(Some("a.b.json")), "a.b.xlsx");
        assert_eq!(download_file_name(Some("noext")), "noext.xlsx");
    }

    #[test]
    fn test_download_file_name_default() {
        assert_eq!(download_file_name(None), "output.xlsx");
        assert_eq!(download_file_name(Some("")), "output.xlsx");
    }

    #[test]
    fn test_download_file_name_keeps_dotfile_stem() {
        assert_eq!(download_file_name(Some(".json")), ".json.xlsx");
    }

    #[test]
    fn test_download_file_name_sanitizes_header_chars() {
        assert_eq!(
            download_file_name(Some("my \"report\".json")),
            "my _report_.xlsx"
        );
        assert_eq!(download_file_name(Some("données.json")), "donn_es.xlsx");
    }

    #[test]
    fn test_api_response_serializes_without_none_fields() {
        let response: ApiResponse<String> = ApiResponse::ok("data".to_string());
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("\"error\""));
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":\"data\""));
    }

    #[test]
    fn test_api_response_error_serializes_without_data() {
        let response: ApiResponse<()> = ApiResponse::err("error message");
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("\"data\""));
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"error message\""));
    }
}
