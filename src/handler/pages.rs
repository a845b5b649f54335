//! HTML page handlers
//!
//! The landing page and registration form are read from disk on every
//! request so they can be edited without a restart. This module also
//! accepts the registration form POST.

use super::router::AppState;
use crate::http;
use crate::logger;
use crate::render::UserListTemplate;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::path::Path;
use tokio::fs;

/// GET / - landing page.
pub async fn serve_index(state: &AppState) -> Response<Full<Bytes>> {
    serve_page(state, &state.config.index_page_path()).await
}

/// GET /register-user-form - registration form.
pub async fn serve_register_form(state: &AppState) -> Response<Full<Bytes>> {
    serve_page(state, &state.config.register_page_path()).await
}

async fn serve_page(state: &AppState, path: &Path) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            if state.config.logging.access_log {
                logger::log_response(content.len());
            }
            http::build_html_response(content)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read page '{}': {e}", path.display()));
            http::build_404_response()
        }
    }
}

/// GET /list-users - render the user list. The template is reloaded
/// from disk on every request.
pub async fn serve_user_list(state: &AppState) -> Response<Full<Bytes>> {
    let template_path = state.config.users_template_path();
    logger::log_template_load(&template_path);

    let template = match UserListTemplate::load(&template_path).await {
        Ok(t) => t,
        Err(e) => {
            logger::log_error(&format!("Template can't be constructed: {e}"));
            return http::build_empty_500_response();
        }
    };

    let users = match state.store.read_users().await {
        Ok(users) => users,
        Err(e) => {
            logger::log_error(&format!("Unable to retrieve list of users: {e}"));
            return http::build_plain_500_response("Unable to retrieve list of users");
        }
    };

    logger::log_template_apply(users.len());
    http::build_html_response(template.render(&users))
}

/// POST /register-new-user - store the submitted user, then answer with
/// the landing page. A storage failure is surfaced as a 500 rather than
/// silently dropped.
pub async fn register_new_user<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            return http::build_400_response("failed to read request body");
        }
    };

    let (first_name, surname) = parse_registration_form(&body);
    logger::log_user_registered(&first_name, &surname);

    match state.store.add_user(&first_name, &surname).await {
        Ok(()) => serve_page(state, &state.config.index_page_path()).await,
        Err(e) => {
            logger::log_error(&format!("Unable to register user: {e}"));
            http::build_plain_500_response("Unable to register user")
        }
    }
}

/// Extract `first_name` and `surname` from a urlencoded form body. A
/// missing field is treated as the empty string; presence is the only
/// thing not even checked, matching the store's contract.
fn parse_registration_form(body: &[u8]) -> (String, String) {
    let mut first_name = String::new();
    let mut surname = String::new();
    for (key, value) in url::form_urlencoded::parse(body) {
        match key.as_ref() {
            "first_name" => first_name = value.into_owned(),
            "surname" => surname = value.into_owned(),
            _ => {}
        }
    }
    (first_name, surname)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_both_fields() {
        let (name, surname) = parse_registration_form(b"first_name=Ada&surname=Lovelace");
        assert_eq!(name, "Ada");
        assert_eq!(surname, "Lovelace");
    }

    #[test]
    fn test_parse_form_missing_fields_default_to_empty() {
        let (name, surname) = parse_registration_form(b"first_name=Ada");
        assert_eq!(name, "Ada");
        assert_eq!(surname, "");

        let (name, surname) = parse_registration_form(b"");
        assert_eq!(name, "");
        assert_eq!(surname, "");
    }

    #[test]
    fn test_parse_form_decodes_percent_encoding() {
        let (name, surname) = parse_registration_form(b"first_name=Jean%2DLuc&surname=O%27Brien");
        assert_eq!(name, "Jean-Luc");
        assert_eq!(surname, "O'Brien");
    }

    #[test]
    fn test_parse_form_ignores_unknown_keys() {
        let (name, surname) =
            parse_registration_form(b"first_name=Ada&surname=Lovelace&csrf=abc123");
        assert_eq!(name, "Ada");
        assert_eq!(surname, "Lovelace");
    }

    #[test]
    fn test_parse_form_plus_is_space() {
        let (name, _) = parse_registration_form(b"first_name=Ada+Augusta&surname=King");
        assert_eq!(name, "Ada Augusta");
    }
}
