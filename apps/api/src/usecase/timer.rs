//! ステップタイマーのユースケース

use std::sync::Arc;

use recepten_domain::{
    DomainError,
    timer::{TimerDraft, TimerId},
};
use recepten_infra::repository::TimerRepository;

use crate::error::ApiError;

/// ステップタイマーのユースケース
pub struct TimerUseCaseImpl {
    timer_repository: Arc<dyn TimerRepository>,
}

impl TimerUseCaseImpl {
    pub fn new(timer_repository: Arc<dyn TimerRepository>) -> Self {
        Self { timer_repository }
    }

    /// 入力を検証してタイマーを作成し、採番された ID を返す
    ///
    /// レシピの存在は確認しない。存在しないレシピを指定すると
    /// 外部キー制約違反としてインフラエラーになる。
    pub async fn create_timer(&self, draft: TimerDraft) -> Result<TimerId, ApiError> {
        let new_timer = draft.validate()?;
        let id = self.timer_repository.insert(&new_timer).await?;
        tracing::info!(timer_id = %id, recipe_id = %new_timer.recipe_id(), "タイマーを作成しました");
        Ok(id)
    }

    /// `active` を反転し、反転後の値を返す
    pub async fn toggle_timer(&self, id: TimerId) -> Result<bool, ApiError> {
        let active = self
            .timer_repository
            .toggle_active(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "Timer",
                id:          id.to_string(),
            })?;
        Ok(active)
    }
}
