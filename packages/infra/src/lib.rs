//! # Recepten インフラ層
//!
//! PostgreSQL との接続と、レシピ・タイマーの永続化を担当する。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//!   ↘           ↗
//!     shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続設定・接続プール・スキーマ作成
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - `mock` - インメモリのテスト用リポジトリ（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use db::{Database, DatabaseSettings, DbConnection};
pub use error::{InfraError, InfraErrorKind};
