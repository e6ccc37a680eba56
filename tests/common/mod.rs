#![allow(dead_code)]

use axum::{Json, Router, extract::State, routing::get};
use chrono::{DateTime, TimeZone, Utc};
use searchcrate::{
    FieldAllowList, Pagination, QueryError, QueryParser, RawParams, RequestDescriptor,
    SearchConfig,
};
use serde_json::{Value, json};

pub const TODO_COLUMNS: [&str; 6] = ["title", "status", "priority", "created_at", "meta", "id"];

/// Fixed instant so dynamic values are predictable
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn params(pairs: &[(&str, &str)]) -> RawParams {
    pairs.iter().copied().collect()
}

pub fn parse(pairs: &[(&str, &str)]) -> RequestDescriptor {
    QueryParser::default().parse_at(&params(pairs), fixed_now())
}

async fn list_todos(
    State(parser): State<QueryParser>,
    params: RawParams,
) -> Result<Json<Value>, QueryError> {
    let request = parser.parse(&params);
    FieldAllowList::new(TODO_COLUMNS).check(&request)?;

    let pagination = Pagination::from_descriptor(&request, parser.config());
    Ok(Json(json!({
        "where": request.where_fragment(),
        "sort": request.sort_fragment().and_then(|sort| sort.sql()),
        "includes": request.includes,
        "keywords": request.keywords,
        "pagination": pagination,
    })))
}

pub fn setup_test_app(config: SearchConfig) -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .with_state(QueryParser::new(config))
}
