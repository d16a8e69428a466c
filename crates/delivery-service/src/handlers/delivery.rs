//! 投放决策处理器
//!
//! v1 和 v2 两个入口行为完全一致，只在日志中区分。

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::dto::DeliveryQuery;
use crate::error::INTERNAL_ERROR_MESSAGE;
use crate::service::Decision;
use crate::state::AppState;

impl IntoResponse for Decision {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(e) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
            }
            Self::NoMatch => StatusCode::NO_CONTENT.into_response(),
            Self::Matched(campaigns) => (StatusCode::OK, Json(campaigns)).into_response(),
            Self::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
            )
                .into_response(),
        }
    }
}

/// GET /v1/delivery
pub async fn deliver_v1(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Decision {
    deliver(&state, &DeliveryQuery::from_pairs(pairs), "v1").await
}

/// GET /v2/delivery
pub async fn deliver_v2(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Decision {
    deliver(&state, &DeliveryQuery::from_pairs(pairs), "v2").await
}

async fn deliver(state: &AppState, query: &DeliveryQuery, binding: &'static str) -> Decision {
    debug!(binding, "Handling delivery request");
    state
        .decision_service
        .decide(&query.app, &query.country, &query.os)
        .await
}
