//! # タイマーハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/timers` - タイマー作成
//! - `POST /api/timers/{id}/toggle` - `active` の反転

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use recepten_domain::timer::{Timer, TimerDraft, TimerId};
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    extract::{IdPath, JsonBody},
    usecase::TimerUseCaseImpl,
};

/// タイマー API の共有状態
pub struct TimerState {
    pub usecase: TimerUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// タイマー作成リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct CreateTimerRequest {
    pub recipe_id:        Option<i32>,
    pub step_number:      Option<i32>,
    pub duration_minutes: Option<i32>,
    pub step_description: Option<String>,
}

impl From<CreateTimerRequest> for TimerDraft {
    fn from(req: CreateTimerRequest) -> Self {
        TimerDraft {
            recipe_id:        req.recipe_id,
            step_number:      req.step_number,
            duration_minutes: req.duration_minutes,
            step_description: req.step_description,
        }
    }
}

/// タイマー DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TimerDto {
    pub id:               i32,
    pub recipe_id:        i32,
    pub step_number:      i32,
    pub step_description: String,
    pub duration_minutes: i32,
    pub active:           bool,
    pub created_at:       Option<String>,
}

impl From<&Timer> for TimerDto {
    fn from(timer: &Timer) -> Self {
        Self {
            id:               timer.id().as_i32(),
            recipe_id:        timer.recipe_id().as_i32(),
            step_number:      timer.step_number(),
            step_description: timer.step_description().to_string(),
            duration_minutes: timer.duration_minutes(),
            active:           timer.is_active(),
            created_at:       timer.created_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// タイマー作成レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTimerResponse {
    pub message:  String,
    pub timer_id: i32,
}

/// トグルレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleTimerResponse {
    pub active: bool,
}

// --- ハンドラ ---

/// POST /api/timers
///
/// ## レスポンス
///
/// - `201 Created`: `{"message": "Timer added", "timer_id": ...}`
/// - `400 Bad Request`: 必須フィールドの欠落、不正な JSON
/// - `500`: 存在しないレシピ（外部キー制約違反）
#[tracing::instrument(skip_all)]
pub async fn create_timer(
    State(state): State<Arc<TimerState>>,
    JsonBody(req): JsonBody<CreateTimerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.usecase.create_timer(req.into()).await?;

    let response = CreateTimerResponse {
        message:  "Timer added".to_string(),
        timer_id: id.as_i32(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/timers/{id}/toggle
#[tracing::instrument(skip_all, fields(timer_id = id))]
pub async fn toggle_timer(
    State(state): State<Arc<TimerState>>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    let active = state.usecase.toggle_timer(TimerId::from_i32(id)).await?;

    Ok(Json(ToggleTimerResponse { active }))
}
