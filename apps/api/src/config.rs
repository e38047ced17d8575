//! # アプリケーション設定
//!
//! 環境変数からサーバー設定とデータベース接続設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `PORT` | No | `10000` | ポート番号 |
//! | `DB_HOST` | **Yes** | - | PostgreSQL ホスト |
//! | `DB_PASSWORD` | **Yes** | - | PostgreSQL パスワード |
//! | `DB_NAME` | No | `postgres` | データベース名 |
//! | `DB_USER` | No | `postgres` | ユーザー名 |
//! | `DB_PORT` | No | `5432` | PostgreSQL ポート |
//! | `DB_SSLMODE` | No | `require` | SSL モード |
//! | `LOG_FORMAT` | No | `pretty` | `json` / `pretty` |
//! | `RUST_LOG` | No | `info,recepten=debug` | ログフィルタ |
//!
//! `DB_HOST` / `DB_PASSWORD` が欠けていてもサーバーは起動する。
//! その場合、DB を使うリクエストはすべて設定不備エラーで失敗する。
//! 値が解釈できない場合（`PORT=abc` など）は起動を中止する。

use recepten_infra::db::{DatabaseSettings, SettingsError};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 10000;

/// 設定の読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT is not a valid port number: {0:?}")]
    InvalidPort(String),

    #[error(transparent)]
    Database(#[from] SettingsError),
}

/// アプリケーション全体の設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:     String,
    /// ポート番号
    pub port:     u16,
    /// データベース接続設定
    pub database: DatabaseSettings,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// キーから値を引く関数を使って設定を組み立てる
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let database = DatabaseSettings::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            database,
        })
    }

    /// `host:port` 形式のバインドアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
