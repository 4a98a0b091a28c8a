//! Static Frontend and Upload Serving
//!
//! Any request no API route claims is resolved against the web root. A path
//! naming an existing file is served as-is; everything else gets the index
//! document so the single-page frontend can route on the client.
//! Uploaded images are reachable because the upload directory sits at
//! `static/images` under the web root.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Build the fallback service: files under `web_root`, else `index_path`.
///
/// Paths that try to leave the web root never resolve and fall back too.
pub fn static_service(web_root: &Path, index_path: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(web_root)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(index_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn site() -> TempDir {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("index.html"), "<html>app</html>").unwrap();
        std::fs::write(root.path().join("app.js"), "console.log(1)").unwrap();
        std::fs::create_dir_all(root.path().join("static/images")).unwrap();
        std::fs::write(root.path().join("static/images/bolt.png"), b"png").unwrap();
        root
    }

    fn app(root: &TempDir) -> Router {
        Router::new().fallback_service(static_service(
            root.path(),
            &root.path().join("index.html"),
        ))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let root = site();
        let (status, body) = get_body(app(&root), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>app</html>");
    }

    #[tokio::test]
    async fn test_existing_file_is_served() {
        let root = site();
        let (status, body) = get_body(app(&root), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");

        let (status, body) = get_body(app(&root), "/static/images/bolt.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "png");
    }

    #[tokio::test]
    async fn test_unknown_path_falls_back_to_index() {
        let root = site();
        let (status, body) = get_body(app(&root), "/robots/42/edit").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>app</html>");
    }

    #[tokio::test]
    async fn test_traversal_does_not_escape_root() {
        let root = site();
        let (_, body) = get_body(app(&root), "/../../etc/passwd").await;
        assert!(!body.contains("root:"));
    }
}
