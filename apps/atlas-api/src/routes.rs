use axum::{
	Json, Router,
	body::Bytes,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;

use atlas_service::{DimensionRef, Error, ErrorBody, PatternResult, SearchEnvelope};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/patterns/search", post(search))
		.route("/v1/patterns/{id}", get(get_pattern))
		.route("/v1/taxonomy/{kind}", get(list_dimensions))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

/// Always answers 200; failures travel inside the envelope.
async fn search(State(state): State<AppState>, body: Bytes) -> Json<SearchEnvelope> {
	let raw = if body.iter().all(u8::is_ascii_whitespace) {
		Value::Null
	} else {
		match serde_json::from_slice::<Value>(&body) {
			Ok(raw) => raw,
			Err(err) => {
				let page = atlas_service::filter::Page::default_for(&state.service.cfg.search);
				let err = Error::Validation {
					field: "$".to_string(),
					message: format!("Request body is not valid JSON: {err}."),
				};

				return Json(SearchEnvelope::failure(page, &err));
			},
		}
	};

	Json(state.service.search(&raw).await)
}

async fn get_pattern(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<PatternResult>, ApiError> {
	let id = id.trim().parse::<i64>().map_err(|_| {
		ApiError::from(Error::Validation {
			field: "id".to_string(),
			message: "id must be an integer.".to_string(),
		})
	})?;
	let pattern = state.service.get_pattern(id).await?;

	Ok(Json(pattern))
}

async fn list_dimensions(
	State(state): State<AppState>,
	Path(kind): Path<String>,
) -> Result<Json<DimensionList>, ApiError> {
	let items = state.service.list_dimensions(&kind).await?;

	Ok(Json(DimensionList { items }))
}

#[derive(Debug, Serialize)]
struct DimensionList {
	items: Vec<DimensionRef>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
	error: ErrorBody,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	body: ErrorBody,
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		let status = match &err {
			Error::Validation { .. } => StatusCode::BAD_REQUEST,
			Error::NotFound { .. } => StatusCode::NOT_FOUND,
			Error::StoreUnavailable { .. } => {
				tracing::error!(error = %err, "Store unavailable.");

				StatusCode::SERVICE_UNAVAILABLE
			},
		};

		Self { status, body: ErrorBody::from(&err) }
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(ErrorResponse { error: self.body })).into_response()
	}
}
