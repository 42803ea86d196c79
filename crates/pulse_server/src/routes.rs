use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use pulse_core::{DegradePolicy, StatKind, Username, UsernameError};
use pulse_engine::{Dashboard, PanelBody};
use pulse_logging::{pulse_info, pulse_warn};
use serde::{Deserialize, Serialize};

use super::error::AppError;
use super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// `degrade=true` returns a partial dashboard with failed panels marked
    /// instead of failing the whole lookup.
    #[serde(default)]
    pub degrade: bool,
}

/// Wire shape of a successful lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub username: String,
    pub avatar_url: String,
    pub stats: StatsBlock,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBlock {
    pub stats_card: PanelDto,
    pub streak_stats: PanelDto,
    pub top_languages: PanelDto,
    pub heatmap: PanelDto,
    pub trophies: PanelDto,
}

/// One panel slot: always the URL, plus the embedded content for inline
/// panels or the failure label for degraded ones.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDto {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatsResponse {
    fn from_dashboard(dashboard: &Dashboard) -> Self {
        Self {
            success: true,
            username: dashboard.username.to_string(),
            avatar_url: dashboard.avatar_url.clone(),
            stats: StatsBlock {
                stats_card: panel_dto(dashboard, StatKind::StatsCard),
                streak_stats: panel_dto(dashboard, StatKind::StreakStats),
                top_languages: panel_dto(dashboard, StatKind::TopLanguages),
                heatmap: panel_dto(dashboard, StatKind::Heatmap),
                trophies: panel_dto(dashboard, StatKind::Trophies),
            },
        }
    }
}

fn panel_dto(dashboard: &Dashboard, kind: StatKind) -> PanelDto {
    match dashboard.panel(kind) {
        Some(panel) => PanelDto {
            url: panel.url.clone(),
            content: match &panel.body {
                PanelBody::Inline(content) => Some(content.clone()),
                _ => None,
            },
            error: match &panel.body {
                PanelBody::Failed(reason) => Some(reason.clone()),
                _ => None,
            },
        },
        // A dashboard carries every panel kind; an empty slot here would be a
        // bug in the aggregator, so surface it rather than fake a success.
        None => PanelDto {
            url: String::new(),
            content: None,
            error: Some("missing".to_string()),
        },
    }
}

pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let username = Username::parse(&username)?;
    let policy = if query.degrade {
        DegradePolicy::BestEffort
    } else {
        DegradePolicy::AllOrNothing
    };

    match state.aggregator.fetch_all(&username, policy).await {
        Ok(dashboard) => {
            pulse_info!("Lookup for `{}` succeeded", username);
            Ok(Json(StatsResponse::from_dashboard(&dashboard)))
        }
        Err(err) => {
            pulse_warn!("Lookup for `{}` failed: {}", username, err);
            Err(AppError::from(err))
        }
    }
}

/// `GET /api/stats` and `GET /api/stats/` carry no identifier at all.
pub async fn missing_username_handler() -> AppError {
    AppError::from(UsernameError::Empty)
}
