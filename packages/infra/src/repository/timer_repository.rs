//! # TimerRepository
//!
//! ステップタイマーの永続化を担当するリポジトリ。
//!
//! レシピの存在は事前確認しない。存在しないレシピへの挿入は
//! 外部キー制約で失敗し、[`InfraErrorKind::ConstraintViolation`] になる。
//!
//! [`InfraErrorKind::ConstraintViolation`]: crate::error::InfraErrorKind::ConstraintViolation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use recepten_domain::{
    recipe::RecipeId,
    timer::{NewTimer, Timer, TimerId},
};

use crate::{db::Database, error::InfraError};

/// タイマーリポジトリトレイト
#[async_trait]
pub trait TimerRepository: Send + Sync {
    /// レシピに属するタイマーをステップ番号順で取得する（同番号は ID 順）
    async fn find_by_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Timer>, InfraError>;

    /// タイマーを挿入し、採番された ID を返す
    async fn insert(&self, timer: &NewTimer) -> Result<TimerId, InfraError>;

    /// `active` を反転し、反転後の値を返す
    ///
    /// 単一の UPDATE 文で行うため、同時実行されても更新が失われない。
    /// タイマーが存在しない場合は `None`。
    async fn toggle_active(&self, id: TimerId) -> Result<Option<bool>, InfraError>;
}

/// 読み取り時の列リスト
///
/// 旧バージョンのサービスが作成したテーブルでは `created_at` が
/// `TIMESTAMP` で、`duration_minutes` と `active` に NULL が入りうる。
const TIMER_COLUMNS: &str = "id, recipe_id, step_number, step_description, duration_minutes, \
                             active, created_at::timestamptz AS created_at";

/// `timers` テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TimerRow {
    id:               i32,
    recipe_id:        i32,
    step_number:      i32,
    step_description: Option<String>,
    duration_minutes: Option<i32>,
    active:           Option<bool>,
    created_at:       Option<DateTime<Utc>>,
}

impl From<TimerRow> for Timer {
    fn from(row: TimerRow) -> Self {
        Timer::from_db(
            TimerId::from_i32(row.id),
            RecipeId::from_i32(row.recipe_id),
            row.step_number,
            row.step_description.unwrap_or_default(),
            row.duration_minutes.unwrap_or(0),
            row.active.unwrap_or(false),
            row.created_at,
        )
    }
}

/// PostgreSQL 実装の TimerRepository
#[derive(Debug, Clone)]
pub struct PostgresTimerRepository {
    db: Database,
}

impl PostgresTimerRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TimerRepository for PostgresTimerRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%recipe_id))]
    async fn find_by_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Timer>, InfraError> {
        let mut conn = self.db.acquire().await?;
        let rows = sqlx::query_as::<_, TimerRow>(&format!(
            "SELECT {TIMER_COLUMNS} FROM timers WHERE recipe_id = $1 ORDER BY step_number ASC, id ASC"
        ))
        .bind(recipe_id.as_i32())
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(Timer::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(recipe_id = %timer.recipe_id()))]
    async fn insert(&self, timer: &NewTimer) -> Result<TimerId, InfraError> {
        let mut conn = self.db.acquire().await?;
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO timers (recipe_id, step_number, step_description, duration_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(timer.recipe_id().as_i32())
        .bind(timer.step_number())
        .bind(timer.step_description())
        .bind(timer.duration_minutes())
        .fetch_one(&mut *conn)
        .await?;

        Ok(TimerId::from_i32(id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn toggle_active(&self, id: TimerId) -> Result<Option<bool>, InfraError> {
        let mut conn = self.db.acquire().await?;
        let active = sqlx::query_scalar::<_, bool>(
            "UPDATE timers SET active = NOT COALESCE(active, FALSE) WHERE id = $1 RETURNING active",
        )
        .bind(id.as_i32())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(active)
    }
}
