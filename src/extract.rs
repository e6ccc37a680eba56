//! Axum integration: pull [`RawParams`] straight out of a request.
//!
//! ```rust,ignore
//! use axum::{Json, Router, extract::State, routing::get};
//! use searchcrate::{QueryParser, RawParams};
//!
//! async fn list_posts(State(parser): State<QueryParser>, params: RawParams) -> Json<Value> {
//!     let request = parser.parse(&params);
//!     // ... hand `request` to the executor
//! }
//!
//! let app = Router::new()
//!     .route("/posts", get(list_posts))
//!     .with_state(QueryParser::default());
//! ```

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::models::RawParams;

impl<S> FromRequestParts<S> for RawParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .uri
            .query()
            .map(RawParams::from_query)
            .unwrap_or_default())
    }
}
