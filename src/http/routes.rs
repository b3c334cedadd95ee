use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use log::{debug, info, warn};

use crate::chart::{build_chart, ChartDescription};
use crate::store::{FeatureRecord, RecordStore};

use super::cors::allow_any_origin;

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub store: Arc<RecordStore>,
}

impl HttpState {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

/// Build the Axum router with all handlers.
pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/api/audio", get(list_records).post(ingest_record))
        .route("/api/audio/chart", get(chart))
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(allow_any_origin))
        .with_state(state)
}

/// Store one record. Always answers 200 with an empty body; a body that
/// fails to decode is logged and stored with defaulted fields.
pub async fn ingest_record(State(state): State<HttpState>, body: Bytes) -> StatusCode {
    let (record, outcome) = FeatureRecord::decode_lenient(&body).into_parts();
    if let Err(err) = outcome {
        warn!("[Ingest] Decode failed, storing defaulted record: {}", err);
    }

    info!("[Ingest] {:?}", record);
    state.store.append(record);
    StatusCode::OK
}

pub async fn list_records(State(state): State<HttpState>) -> Json<Vec<FeatureRecord>> {
    let records = state.store.list_all();
    debug!("[List] Returning {} records", records.len());
    Json(records)
}

pub async fn chart(State(state): State<HttpState>) -> Json<ChartDescription> {
    let records = state.store.list_all();
    debug!("[Chart] Projecting {} records", records.len());
    Json(build_chart(&records))
}
