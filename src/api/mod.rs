//! JSON API module
//!
//! REST endpoints over the user store: the user list as a bare JSON
//! array (no envelope, no pagination) and delete-by-id.

use crate::handler::router::AppState;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// GET /users - serialize all users as a JSON array of
/// `{id, name, surname}` objects.
pub async fn list_users(state: &AppState) -> Response<Full<Bytes>> {
    match state.store.read_users().await {
        Ok(users) => json_response(StatusCode::OK, &users),
        Err(e) => {
            logger::log_error(&format!("Unable to retrieve list of users: {e}"));
            http::build_plain_500_response("Unable to retrieve list of users")
        }
    }
}

/// DELETE /user/{id} - idempotent delete; 200 with an empty body on
/// success, including when the id matched nothing.
pub async fn delete_user(state: &AppState, id: &str) -> Response<Full<Bytes>> {
    logger::log_user_delete(id);
    match state.store.delete_user(id).await {
        Ok(()) => http::build_empty_ok_response(),
        Err(e) => {
            logger::log_error(&format!("Unable to delete user {id}: {e}"));
            http::build_plain_500_response("Unable to delete user")
        }
    }
}

/// Build JSON response
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return http::build_plain_500_response("Internal server error");
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::User;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_user_json_shape() {
        let users = vec![User {
            id: 1,
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
        }];
        let resp = json_response(StatusCode::OK, &users);

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(
            body,
            r#"[{"id":1,"name":"Ada","surname":"Lovelace"}]"#.as_bytes()
        );
    }

    #[tokio::test]
    async fn test_empty_list_serializes_to_empty_array() {
        let users: Vec<User> = vec![];
        let resp = json_response(StatusCode::OK, &users);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, "[]".as_bytes());
    }
}
