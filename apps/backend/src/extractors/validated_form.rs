use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Form body extractor whose failures are problem+json 400s.
#[derive(Debug)]
pub struct ValidatedForm<T>(pub T);

/// Query string extractor whose failures are problem+json 400s.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> ValidatedForm<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> ValidatedQuery<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedForm<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedForm<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = web::Form::<T>::from_request(req, payload);
        Box::pin(async move {
            match fut.await {
                Ok(form) => Ok(ValidatedForm(form.into_inner())),
                Err(e) => {
                    // Body content may include passwords; log only the error.
                    debug!(error = %e, "Form parsing failed");
                    Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Invalid form body: {e}"),
                    ))
                }
            }
        })
    }
}

impl<T> FromRequest for ValidatedQuery<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = web::Query::<T>::from_query(req.query_string())
            .map(|query| ValidatedQuery(query.into_inner()))
            .map_err(|e| {
                debug!(error = %e, "Query parsing failed");
                AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {e}"))
            });
        ready(parsed)
    }
}
