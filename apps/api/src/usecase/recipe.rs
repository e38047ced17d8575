//! レシピ管理ユースケース

use std::sync::Arc;

use recepten_domain::{
    DomainError,
    recipe::{Recipe, RecipeDraft, RecipeId},
    timer::Timer,
};
use recepten_infra::repository::{RecipeRepository, TimerRepository};

use crate::error::ApiError;

/// タイマー付きのレシピ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeWithTimers {
    pub recipe: Recipe,
    pub timers: Vec<Timer>,
}

/// レシピ管理ユースケース
pub struct RecipeUseCaseImpl {
    recipe_repository: Arc<dyn RecipeRepository>,
    timer_repository:  Arc<dyn TimerRepository>,
}

impl RecipeUseCaseImpl {
    pub fn new(
        recipe_repository: Arc<dyn RecipeRepository>,
        timer_repository: Arc<dyn TimerRepository>,
    ) -> Self {
        Self {
            recipe_repository,
            timer_repository,
        }
    }

    /// レシピ一覧を新しい順で取得する（タイマーは含まない）
    pub async fn list_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        let recipes = self.recipe_repository.find_all().await?;
        Ok(recipes)
    }

    /// 入力を検証してレシピを作成し、採番された ID を返す
    pub async fn create_recipe(&self, draft: RecipeDraft) -> Result<RecipeId, ApiError> {
        let new_recipe = draft.validate()?;
        let id = self.recipe_repository.insert(&new_recipe).await?;
        tracing::info!(recipe_id = %id, "レシピを作成しました");
        Ok(id)
    }

    /// レシピとそのタイマーを取得する
    ///
    /// タイマーはステップ番号順。レシピが存在しない場合は NotFound。
    pub async fn get_recipe(&self, id: RecipeId) -> Result<RecipeWithTimers, ApiError> {
        let recipe = self
            .recipe_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "Recipe",
                id:          id.to_string(),
            })?;
        let timers = self.timer_repository.find_by_recipe(id).await?;

        Ok(RecipeWithTimers { recipe, timers })
    }
}
