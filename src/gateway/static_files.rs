//! Static file serving module
//!
//! Resolves request paths against a mount root and builds file responses
//! with content types, `ETag` validation, and HEAD support.

use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::error::AssetError;
use crate::gateway::mounts::Mount;
use crate::gateway::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;

const INDEX_FILE: &str = "index.html";

/// Serve a request from a mount, turning load failures into responses.
///
/// Traversal rejections and missing assets both answer 404; the former is
/// additionally logged as a security event.
pub async fn serve_mount(ctx: &RequestContext<'_>, mount: &Mount) -> Response<Full<Bytes>> {
    match load_asset(mount, ctx.path).await {
        Ok((content, content_type)) => {
            if ctx.access_log {
                logger::log_response(content.len());
            }
            build_asset_response(content, content_type, ctx.if_none_match.as_deref(), ctx.is_head)
        }
        Err(AssetError::TraversalRejected) => {
            logger::log_security(&format!("path traversal attempt blocked: {}", ctx.path));
            http::build_404_response()
        }
        Err(AssetError::NotFound) => http::build_404_response(),
    }
}

/// Resolve and read an asset under the mount root.
///
/// Paths containing parent-directory segments are rejected before any
/// filesystem access. Resolved paths are canonicalized and must stay under
/// the canonical mount root, which also covers symlink escapes. On an SPA
/// mount, a directory or unresolved path falls back to the bundle's
/// `index.html`; on a fixed-asset mount it is a plain miss.
pub async fn load_asset(
    mount: &Mount,
    request_path: &str,
) -> Result<(Vec<u8>, &'static str), AssetError> {
    let relative = mount.relative_path(request_path);
    if relative.split('/').any(|segment| segment == "..") {
        return Err(AssetError::TraversalRejected);
    }

    let candidate = mount.root.join(relative);
    match candidate.canonicalize() {
        Ok(resolved) if !resolved.starts_with(&mount.root) => Err(AssetError::TraversalRejected),
        Ok(resolved) if resolved.is_file() => read_asset(&resolved).await,
        Ok(_) | Err(_) => {
            if mount.spa_fallback {
                read_asset(&mount.root.join(INDEX_FILE)).await
            } else {
                Err(AssetError::NotFound)
            }
        }
    }
}

async fn read_asset(path: &Path) -> Result<(Vec<u8>, &'static str), AssetError> {
    let content = fs::read(path).await.map_err(|_| AssetError::NotFound)?;
    let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));
    Ok((content, content_type))
}

/// Build the asset response with `ETag` validation
fn build_asset_response(
    data: Vec<u8>,
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&data);

    if cache::etag_matches(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::response::build_cached_response(Bytes::from(data), content_type, &etag, is_head)
}
