//! Custom axum extractors for Campus
//!
//! Every rejection produced here is an `Error::Validation`, so malformed
//! bodies, query strings and path segments all answer with the standard
//! error envelope.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use sqlx::{QueryBuilder, Sqlite};
use validator::Validate;

use crate::Error;

/// Maximum page size for list endpoints
pub const MAX_LIMIT: i64 = 100;

/// Optional `offset`/`limit` query parameters shared by the list endpoints.
///
/// Without either parameter a list returns the whole collection. Explicit
/// values are clamped instead of rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// Get the offset, defaulting to 0
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Requested page size capped at 100; `None` means unbounded
    pub fn limit(&self) -> Option<i64> {
        self.limit.map(|l| l.clamp(1, MAX_LIMIT))
    }

    /// True when the caller asked for a window of the collection
    pub fn is_windowed(&self) -> bool {
        self.offset.is_some() || self.limit.is_some()
    }

    /// Append `LIMIT`/`OFFSET` when a window was requested.
    ///
    /// SQLite needs a `LIMIT` before `OFFSET`; `-1` stands for no limit.
    pub fn push_window(&self, query: &mut QueryBuilder<'_, Sqlite>) {
        if !self.is_windowed() {
            return;
        }

        query
            .push(" LIMIT ")
            .push_bind(self.limit().unwrap_or(-1))
            .push(" OFFSET ")
            .push_bind(self.offset());
    }
}

/// JSON extractor that runs `validator` rules after deserializing.
///
/// Malformed JSON, a body of the wrong shape and failed validation rules
/// all become `Error::Validation` (400) with the standard error envelope.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[derive(Debug)]
pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Validation(Error),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            ValidatedJsonRejection::Json(e) => Error::Validation(e.body_text()).into_response(),
            ValidatedJsonRejection::Validation(e) => e.into_response(),
        }
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value.validate().map_err(|e| {
            ValidatedJsonRejection::Validation(Error::Validation(format!(
                "Validation failed: {}",
                e
            )))
        })?;
        Ok(ValidatedJson(value))
    }
}

/// Query string extractor answering bad parameters with `Error::Validation`
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state)
                .await
                .map_err(|e| Error::Validation(e.body_text()))?;
        Ok(ValidatedQuery(value))
    }
}

/// Path extractor answering unparsable segments with `Error::Validation`
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| Error::Validation(e.body_text()))?;
        Ok(ValidatedPath(value))
    }
}
