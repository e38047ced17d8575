//! # ReceptenApp API サーバー
//!
//! レシピとステップタイマーを管理する JSON API。
//!
//! ## モジュール構成
//!
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - API エラーと HTTP レスポンスへの変換
//! - [`extract`] - エラーを JSON で返すエクストラクタ
//! - [`usecase`] - リポジトリのオーケストレーション
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`app_builder`] - ルーター構築とシャットダウンシグナル
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use recepten_api::app_builder::{AppDependencies, build_router};
//! use recepten_infra::db::Database;
//!
//! let router = build_router(AppDependencies::postgres(database));
//! ```

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;
