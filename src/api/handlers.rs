// API handler functions

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::response::json_response;

/// Credentials of the current user.
///
/// Mock data until the real auth backend is wired in; the frontend only
/// needs the shape and a stable example to render against.
#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub email: String,
    pub is_active: bool,
    pub profile_id: String,
    pub registered_at: String,
    pub updated_at: String,
    pub username: String,
}

impl Default for CurrentUser {
    fn default() -> Self {
        Self {
            email: "example@example.com".to_string(),
            is_active: true,
            profile_id: "1".to_string(),
            registered_at: "2025-06-15T18:29:56+00:00".to_string(),
            updated_at: "2025-06-15T18:29:56+00:00".to_string(),
            username: "user123".to_string(),
        }
    }
}

/// `GET /users/me` - current user credentials
pub fn current_user() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &CurrentUser::default())
}
