//! # テスト用モックリポジトリ
//!
//! ハンドラ・ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! recepten-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! レシピとタイマーは [`MockStore`] を共有し、PostgreSQL 実装と同じ
//! 並び順・外部キー制約・ID 採番を再現する。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use recepten_domain::{
    recipe::{NewRecipe, Recipe, RecipeId},
    timer::{NewTimer, Timer, TimerId},
};

use crate::{
    error::InfraError,
    repository::{RecipeRepository, TimerRepository},
};

/// モックの作成日時の起点（2024-01-01T00:00:00Z）
const EPOCH_SECS: i64 = 1_704_067_200;

// ===== MockStore =====

/// レシピとタイマーを保持する共有インメモリストア
#[derive(Clone, Default)]
pub struct MockStore {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    recipes:        Vec<Recipe>,
    timers:         Vec<Timer>,
    next_recipe_id: i32,
    next_timer_id:  i32,
    ticks:          i64,
    offline:        bool,
}

impl Tables {
    /// 挿入ごとに 1 秒ずつ進む作成日時
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        DateTime::from_timestamp(EPOCH_SECS, 0).unwrap_or_default() + Duration::seconds(self.ticks)
    }

    fn check_online(&self) -> Result<(), InfraError> {
        if self.offline {
            return Err(InfraError::connection(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降のすべての操作を接続エラーにする（`false` で復帰）
    pub fn set_offline(&self, offline: bool) {
        self.tables.lock().unwrap().offline = offline;
    }

    /// 保存済みのタイマー数
    pub fn timer_count(&self) -> usize {
        self.tables.lock().unwrap().timers.len()
    }
}

// ===== MockRecipeRepository =====

#[derive(Clone, Default)]
pub struct MockRecipeRepository {
    store: MockStore,
}

impl MockRecipeRepository {
    pub fn new(store: MockStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecipeRepository for MockRecipeRepository {
    async fn find_all(&self) -> Result<Vec<Recipe>, InfraError> {
        let tables = self.store.tables.lock().unwrap();
        tables.check_online()?;

        let mut recipes = tables.recipes.clone();
        recipes.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_i32().cmp(&a.id().as_i32()))
        });
        Ok(recipes)
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, InfraError> {
        let tables = self.store.tables.lock().unwrap();
        tables.check_online()?;

        Ok(tables.recipes.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, recipe: &NewRecipe) -> Result<RecipeId, InfraError> {
        let mut tables = self.store.tables.lock().unwrap();
        tables.check_online()?;

        tables.next_recipe_id += 1;
        let id = RecipeId::from_i32(tables.next_recipe_id);
        let created_at = tables.next_timestamp();
        tables
            .recipes
            .push(Recipe::from_new(id, recipe.clone(), created_at));
        Ok(id)
    }
}

// ===== MockTimerRepository =====

#[derive(Clone, Default)]
pub struct MockTimerRepository {
    store: MockStore,
}

impl MockTimerRepository {
    pub fn new(store: MockStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TimerRepository for MockTimerRepository {
    async fn find_by_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Timer>, InfraError> {
        let tables = self.store.tables.lock().unwrap();
        tables.check_online()?;

        let mut timers: Vec<Timer> = tables
            .timers
            .iter()
            .filter(|t| t.recipe_id() == recipe_id)
            .cloned()
            .collect();
        timers.sort_by_key(|t| (t.step_number(), t.id().as_i32()));
        Ok(timers)
    }

    async fn insert(&self, timer: &NewTimer) -> Result<TimerId, InfraError> {
        let mut tables = self.store.tables.lock().unwrap();
        tables.check_online()?;

        if !tables.recipes.iter().any(|r| r.id() == timer.recipe_id()) {
            return Err(InfraError::constraint_violation(format!(
                "insert or update on table \"timers\" violates foreign key constraint \
                 \"timers_recipe_id_fkey\": recipe {} does not exist",
                timer.recipe_id()
            )));
        }

        tables.next_timer_id += 1;
        let id = TimerId::from_i32(tables.next_timer_id);
        let created_at = tables.next_timestamp();
        tables
            .timers
            .push(Timer::from_new(id, timer.clone(), created_at));
        Ok(id)
    }

    async fn toggle_active(&self, id: TimerId) -> Result<Option<bool>, InfraError> {
        let mut tables = self.store.tables.lock().unwrap();
        tables.check_online()?;

        let Some(timer) = tables.timers.iter_mut().find(|t| t.id() == id) else {
            return Ok(None);
        };
        *timer = timer.toggled();
        Ok(Some(timer.is_active()))
    }
}
