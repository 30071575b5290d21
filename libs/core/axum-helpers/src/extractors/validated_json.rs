//! JSON extractor with validation through the `validator` crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the body as JSON, then runs [`Validate::validate`].
///
/// Malformed bodies reject with the JSON rejection's status; invalid fields
/// reject with `400 VALIDATION_ERROR` and per-field details.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Signup {
        #[validate(email)]
        email: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/signup",
            post(|ValidatedJson(body): ValidatedJson<Signup>| async move { body.email }),
        )
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::post("/signup")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let response = app().oneshot(post_json(r#"{"email":"ada@example.com"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_field_is_bad_request() {
        let response = app().oneshot(post_json(r#"{"email":"nope"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected() {
        let response = app().oneshot(post_json(r#"{}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
