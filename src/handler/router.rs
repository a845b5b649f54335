//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: maps method+path to one of
//! the six routes and delegates all persistence to the user store.

use super::pages;
use crate::api;
use crate::config::Config;
use crate::http;
use crate::logger;
use crate::storage::UserStore;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Shared application state: the configuration and the single user
/// store every request goes through. The router itself holds nothing
/// else; requests are independent of each other.
pub struct AppState {
    pub config: Config,
    pub store: UserStore,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if state.config.logging.access_log {
        logger::log_request(&method, req.uri(), req.version());
    }
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    let response = match (method, path.as_str()) {
        (Method::GET, "/") => pages::serve_index(&state).await,
        (Method::GET, "/list-users") => pages::serve_user_list(&state).await,
        (Method::GET, "/register-user-form") => pages::serve_register_form(&state).await,
        (Method::POST, "/register-new-user") => pages::register_new_user(req, &state).await,
        (Method::GET, "/users") => api::list_users(&state).await,
        (Method::DELETE, p) => match p.strip_prefix("/user/") {
            Some(id) if !id.is_empty() && !id.contains('/') => {
                api::delete_user(&state, id).await
            }
            _ => http::build_404_response(),
        },
        _ => http::build_404_response(),
    };

    Ok(response)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
