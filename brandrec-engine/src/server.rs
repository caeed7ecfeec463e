//! HTTP surface: a liveness route and the recommendation route.
//!
//! The scoring pipeline is synchronous, so the handler moves it onto tokio's
//! blocking pool. Errors become `{"error": ..., "code": ...}` bodies.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::catalog::HttpCatalog;
use crate::config::EngineConfig;
use crate::error::RecommendError;
use crate::recommendation::DEFAULT_LIMIT;
use crate::recommender::Recommender;
use crate::types::RecommendationResponse;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Shared handler state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
	/// `None` when no backend URL is configured.
	pub recommender: Option<Recommender>,
}

impl AppState {
	pub fn from_config(config: &EngineConfig) -> Self {
		let recommender = config.upstream.clone().map(|upstream| {
			Recommender::new(
				Arc::new(HttpCatalog::new(upstream)),
				config.weights,
				config.price_range,
			)
		});
		Self { recommender }
	}
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ApiError {
	Recommend(RecommendError),
	/// The query string did not parse (e.g. a non-integer `limit`).
	InvalidLimit(String),
	/// The blocking task panicked or was cancelled.
	Internal(String),
}

impl From<RecommendError> for ApiError {
	fn from(err: RecommendError) -> Self {
		Self::Recommend(err)
	}
}

impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		Self::InvalidLimit(rejection.body_text())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let (status, body) = match self {
			ApiError::Recommend(err) => {
				let status = match &err {
					RecommendError::UpstreamNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
					RecommendError::UpstreamUnavailable(_)
					| RecommendError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
					RecommendError::NotFound(_) => StatusCode::NOT_FOUND,
					RecommendError::InvalidScore { .. } | RecommendError::InvalidConfig(_) => {
						StatusCode::INTERNAL_SERVER_ERROR
					}
				};
				if status.is_server_error() {
					tracing::error!(code = err.code(), "{err}");
				} else {
					tracing::warn!(code = err.code(), "{err}");
				}
				(status, err.to_json_error())
			}
			ApiError::InvalidLimit(msg) => {
				tracing::warn!(code = "INVALID_LIMIT", "{msg}");
				(
					StatusCode::BAD_REQUEST,
					json!({ "error": msg, "code": "INVALID_LIMIT" }),
				)
			}
			ApiError::Internal(msg) => {
				tracing::error!("Internal error: {msg}");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					json!({ "error": msg, "code": "INTERNAL" }),
				)
			}
		};
		(status, Json(body)).into_response()
	}
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/", get(read_root))
		.route("/api/brands/{product_id}", get(recommend_brands))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

async fn read_root() -> Json<Value> {
	Json(json!({ "Hello": "World" }))
}

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
	pub limit: Option<i64>,
}

async fn recommend_brands(
	State(state): State<AppState>,
	Path(product_id): Path<String>,
	params: Result<Query<RecommendParams>, QueryRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
	let Query(params) = params?;
	let recommender = state
		.recommender
		.clone()
		.ok_or(RecommendError::UpstreamNotConfigured)?;
	let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

	let response = tokio::task::spawn_blocking(move || recommender.recommend(&product_id, limit))
		.await
		.map_err(|e| ApiError::Internal(format!("recommendation task failed: {e}")))??;

	Ok(Json(response))
}
