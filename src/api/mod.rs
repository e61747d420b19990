// API module entry
// The backend routes the gateway fronts. Dispatched before any mount so a
// route can never be shadowed by the frontend catch-all.

mod handlers;
mod response;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

use crate::logger;

/// Whether `path` is owned by the API layer. Everything else belongs to the
/// mounts.
pub fn is_api_path(path: &str) -> bool {
    matches!(path, "/users/me")
}

/// Dispatch a request on an API-owned path
pub fn handle_api_request(method: &Method, path: &str) -> Response<Full<Bytes>> {
    let resp = match (method, path) {
        (&Method::GET, "/users/me") => handlers::current_user(),
        _ => response::method_not_allowed(),
    };

    logger::log_api_request(method.as_str(), path, resp.status().as_u16());
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_path_set() {
        assert!(is_api_path("/users/me"));
        assert!(!is_api_path("/users/me/extra"));
        assert!(!is_api_path("/static/frontend-settings.json"));
        assert!(!is_api_path("/"));
    }

    #[test]
    fn test_dispatch() {
        let ok = handle_api_request(&Method::GET, "/users/me");
        assert_eq!(ok.status(), 200);

        let not_allowed = handle_api_request(&Method::POST, "/users/me");
        assert_eq!(not_allowed.status(), 405);
    }
}
