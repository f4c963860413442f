use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApiError;

// Drop-in replacements for axum's body/query/path extractors. The stock
// rejections answer with plain-text bodies and their own status codes;
// these route every deserialization failure through ApiError so clients
// always see the `{"success": false, "error": ...}` shape.

#[derive(Debug)]
pub struct Json<T>(pub T);

#[derive(Debug)]
pub struct Query<T>(pub T);

pub struct Path<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for Query<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for Path<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) =
            axum::extract::Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header, http::StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(with = "time::serde::rfc3339")]
        due: time::OffsetDateTime,
    }

    #[derive(Debug, Deserialize)]
    struct Params {
        page: Option<i64>,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_json_passes_through() {
        let req = json_request(r#"{"due": "2024-01-01T00:00:00Z"}"#);
        let Json(payload) = Json::<Payload>::from_request(req, &()).await.unwrap();
        assert_eq!(payload.due.year(), 2024);
    }

    #[tokio::test]
    async fn missing_required_field_is_validation_error() {
        let req = json_request(r#"{"other": "x"}"#);
        let err = Json::<Payload>::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unparseable_date_is_validation_error() {
        let req = json_request(r#"{"due": "next tuesday"}"#);
        let err = Json::<Payload>::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_query_is_validation_error() {
        let req = axum::http::Request::builder()
            .uri("/task/getalltasks?page=abc")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let err = Query::<Params>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_query_passes_through() {
        let req = axum::http::Request::builder()
            .uri("/task/getalltasks?page=2")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let Query(params) = Query::<Params>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(params.page, Some(2));
    }
}
