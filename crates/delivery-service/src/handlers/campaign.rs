//! 活动查询处理器

use axum::{
    Json,
    extract::{Path, State},
};
use targeting_engine::Campaign;

use crate::error::Result;
use crate::state::AppState;

/// GET /v1/campaigns
pub async fn list_campaigns(State(state): State<AppState>) -> Result<Json<Vec<Campaign>>> {
    let campaigns = state.decision_service.list_active().await?;
    Ok(Json(campaigns))
}

/// GET /v1/campaigns/{cid}
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(cid): Path<String>,
) -> Result<Json<Campaign>> {
    let campaign = state.decision_service.get_campaign(&cid).await?;
    Ok(Json(campaign))
}
