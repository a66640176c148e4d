use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;

/// Download a stored artifact (GET /images/{filename}).
///
/// Serves the raw bytes as an attachment. Anything that does not name a
/// plain file inside the output directory resolves to the same 404 as a
/// missing file.
pub async fn download_image(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let filename = sanitize_filename(&filename).ok_or(ServerError::NotFound)?;
    let path = state.output_dir.join(filename);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ServerError::NotFound)
        }
        Err(err) => {
            return Err(ServerError::Internal(format!(
                "failed to read {}: {err}",
                path.display()
            )))
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type(filename)),
    );
    let disposition = format!("attachment; filename=\"{filename}\"");
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|_| ServerError::NotFound)?,
    );

    Ok((headers, bytes))
}

/// Accept only a bare filename; path separators and parent components are
/// rejected. The path parameter is percent-decoded by the router, so an
/// encoded slash arrives here as a literal one.
fn sanitize_filename(name: &str) -> Option<&str> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return None;
    }
    Some(name)
}

/// Content type by artifact extension
fn content_type(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_rejects_traversal() {
        assert!(sanitize_filename("scan_20240101_120000.jpg").is_some());
        assert!(sanitize_filename("../etc/passwd").is_none());
        assert!(sanitize_filename("a/b.jpg").is_none());
        assert!(sanitize_filename("a\\b.jpg").is_none());
        assert!(sanitize_filename("..").is_none());
        assert!(sanitize_filename("").is_none());
    }

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type("scan.jpg"), "image/jpeg");
        assert_eq!(content_type("scan.jpeg"), "image/jpeg");
        assert_eq!(content_type("scan.png"), "image/png");
        assert_eq!(content_type("scan"), "application/octet-stream");
    }
}
