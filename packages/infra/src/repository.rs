//! # リポジトリ実装
//!
//! レシピとタイマーの永続化を担当する。
//!
//! 行のデコードは名前付きフィールドの `sqlx::FromRow` 構造体で行い、
//! エンティティへの変換はエンティティごとに一箇所にまとめる。

pub mod recipe_repository;
pub mod timer_repository;

pub use recipe_repository::{PostgresRecipeRepository, RecipeRepository};
pub use timer_repository::{PostgresTimerRepository, TimerRepository};
