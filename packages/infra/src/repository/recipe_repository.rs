//! # RecipeRepository
//!
//! レシピの永続化を担当するリポジトリ。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recepten_domain::recipe::{
    DEFAULT_COOKING_TIME,
    DEFAULT_SERVINGS,
    NewRecipe,
    Recipe,
    RecipeId,
};

use crate::{db::Database, error::InfraError};

/// レシピリポジトリトレイト
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// 全レシピを作成日時の新しい順で取得する（同時刻は ID の大きい順）
    async fn find_all(&self) -> Result<Vec<Recipe>, InfraError>;

    /// ID でレシピを検索する
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, InfraError>;

    /// レシピを挿入し、採番された ID を返す
    async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, InfraError>;
}

/// 読み取り時の列リスト
///
/// 旧バージョンのサービスが作成したテーブルでは `created_at` が
/// `TIMESTAMP` で、数値列に NULL が入りうる。`created_at` は
/// `TIMESTAMPTZ` に揃え、NULL は `From<RecipeRow>` で既定値にする。
const RECIPE_COLUMNS: &str = "id, title, ingredients, instructions, cooking_time, servings, \
                              created_at::timestamptz AS created_at";

/// `recipes` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id:           i32,
    title:        String,
    ingredients:  Option<String>,
    instructions: Option<String>,
    cooking_time: Option<i32>,
    servings:     Option<i32>,
    created_at:   Option<DateTime<Utc>>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe::from_db(
            RecipeId::from_i32(row.id),
            row.title,
            row.ingredients.unwrap_or_default(),
            row.instructions.unwrap_or_default(),
            row.cooking_time.unwrap_or(DEFAULT_COOKING_TIME),
            row.servings.unwrap_or(DEFAULT_SERVINGS),
            row.created_at,
        )
    }
}

/// PostgreSQL 実装の RecipeRepository
#[derive(Debug, Clone)]
pub struct PostgresRecipeRepository {
    db: Database,
}

impl PostgresRecipeRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Recipe>, InfraError> {
        let mut conn = self.db.acquire().await?;
        let rows = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY created_at DESC NULLS LAST, id DESC"
        ))
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, InfraError> {
        let mut conn = self.db.acquire().await?;
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(Recipe::from))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, InfraError> {
        let mut conn = self.db.acquire().await?;
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO recipes (title, ingredients, instructions, cooking_time, servings)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(recipe.title().as_str())
        .bind(recipe.ingredients())
        .bind(recipe.instructions())
        .bind(recipe.cooking_time())
        .bind(recipe.servings())
        .fetch_one(&mut *conn)
        .await?;

        Ok(RecipeId::from_i32(id))
    }
}
