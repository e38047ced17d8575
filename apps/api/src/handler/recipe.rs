//! # レシピハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/recipes` - レシピ一覧（新しい順、タイマーなし）
//! - `POST /api/recipes` - レシピ作成
//! - `GET /api/recipes/{id}` - タイマー付きのレシピ詳細

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use recepten_domain::recipe::{Recipe, RecipeDraft, RecipeId};
use serde::{Deserialize, Serialize};

use super::timer::TimerDto;
use crate::{
    error::ApiError,
    extract::{IdPath, JsonBody},
    usecase::{RecipeUseCaseImpl, RecipeWithTimers},
};

/// レシピ API の共有状態
pub struct RecipeState {
    pub usecase: RecipeUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// レシピ作成リクエスト
///
/// `title` 以外は省略可能。欠落の判定はドメイン層の検証で行う。
#[derive(Debug, Default, Deserialize)]
pub struct CreateRecipeRequest {
    pub title:        Option<String>,
    pub ingredients:  Option<String>,
    pub instructions: Option<String>,
    pub cooking_time: Option<i32>,
    pub servings:     Option<i32>,
}

impl From<CreateRecipeRequest> for RecipeDraft {
    fn from(req: CreateRecipeRequest) -> Self {
        RecipeDraft {
            title:        req.title,
            ingredients:  req.ingredients,
            instructions: req.instructions,
            cooking_time: req.cooking_time,
            servings:     req.servings,
        }
    }
}

/// レシピ DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecipeDto {
    pub id:           i32,
    pub title:        String,
    pub ingredients:  String,
    pub instructions: String,
    pub cooking_time: i32,
    pub servings:     i32,
    pub created_at:   Option<String>,
}

impl From<&Recipe> for RecipeDto {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id:           recipe.id().as_i32(),
            title:        recipe.title().to_string(),
            ingredients:  recipe.ingredients().to_string(),
            instructions: recipe.instructions().to_string(),
            cooking_time: recipe.cooking_time(),
            servings:     recipe.servings(),
            created_at:   recipe.created_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// タイマー付きのレシピ DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecipeDetailDto {
    #[serde(flatten)]
    pub recipe: RecipeDto,
    pub timers: Vec<TimerDto>,
}

impl From<&RecipeWithTimers> for RecipeDetailDto {
    fn from(found: &RecipeWithTimers) -> Self {
        Self {
            recipe: RecipeDto::from(&found.recipe),
            timers: found.timers.iter().map(TimerDto::from).collect(),
        }
    }
}

/// レシピ作成レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRecipeResponse {
    pub message:   String,
    pub recipe_id: i32,
}

// --- ハンドラ ---

/// GET /api/recipes
#[tracing::instrument(skip_all)]
pub async fn list_recipes(
    State(state): State<Arc<RecipeState>>,
) -> Result<impl IntoResponse, ApiError> {
    let recipes = state.usecase.list_recipes().await?;

    let items: Vec<RecipeDto> = recipes.iter().map(RecipeDto::from).collect();
    Ok(Json(items))
}

/// POST /api/recipes
///
/// ## レスポンス
///
/// - `201 Created`: `{"message": "Recipe added", "recipe_id": ...}`
/// - `400 Bad Request`: `title` の欠落、範囲外の数値、不正な JSON
#[tracing::instrument(skip_all)]
pub async fn create_recipe(
    State(state): State<Arc<RecipeState>>,
    JsonBody(req): JsonBody<CreateRecipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.usecase.create_recipe(req.into()).await?;

    let response = CreateRecipeResponse {
        message:   "Recipe added".to_string(),
        recipe_id: id.as_i32(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/recipes/{id}
#[tracing::instrument(skip_all, fields(recipe_id = id))]
pub async fn get_recipe(
    State(state): State<Arc<RecipeState>>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    let found = state.usecase.get_recipe(RecipeId::from_i32(id)).await?;

    Ok(Json(RecipeDetailDto::from(&found)))
}
