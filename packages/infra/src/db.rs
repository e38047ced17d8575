//! # PostgreSQL データベース接続管理
//!
//! 接続設定の読み込み、遅延接続プールの作成、スコープ付きコネクションの取得、
//! 起動時のスキーマ作成を行う。
//!
//! ## 接続のライフサイクル
//!
//! 1. 起動時に [`Database::new`] でハンドルを作る（この時点では接続しない）
//! 2. 各操作が [`Database::acquire`] で [`DbConnection`] を借りる
//! 3. [`DbConnection`] のドロップでプールに返却される（エラー経路でも同じ）
//!
//! 必須設定が欠けている場合でも起動は止めない。ハンドルは設定不備を記憶し、
//! 以降のすべての取得要求に対して即座に [`InfraErrorKind::Configuration`] を返す。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use recepten_infra::db::{Database, DatabaseSettings};
//!
//! let settings = DatabaseSettings::from_env()?;
//! let database = Database::new(&settings);
//!
//! let mut conn = database.acquire().await?;
//! let version = recepten_infra::db::server_version(&mut conn).await?;
//! ```
//!
//! [`InfraErrorKind::Configuration`]: crate::error::InfraErrorKind::Configuration

use std::{
    fmt,
    ops::{Deref, DerefMut},
    time::Duration,
};

use sqlx::{
    PgConnection,
    PgPool,
    Postgres,
    pool::PoolConnection,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use thiserror::Error;

use crate::error::InfraError;

/// `DB_PORT` 未設定時のポート
pub const DEFAULT_DB_PORT: u16 = 5432;

/// `DB_NAME` / `DB_USER` 未設定時の値
const DEFAULT_DB_NAME: &str = "postgres";
const DEFAULT_DB_USER: &str = "postgres";

/// 接続取得のタイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// DatabaseSettings
// =============================================================================

/// 接続設定の値が解釈できない場合のエラー
///
/// 必須項目の欠落はここでは扱わない（[`Database`] が記憶して実行時に返す）。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{key} is not a valid value: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// データベース接続設定
///
/// `DB_HOST` と `DB_PASSWORD` は必須。欠けている場合も構造体は作れるが、
/// [`connect_options`](Self::connect_options) が設定不備エラーを返す。
#[derive(Clone)]
pub struct DatabaseSettings {
    pub host:     Option<String>,
    pub name:     String,
    pub user:     String,
    pub password: Option<String>,
    pub port:     u16,
    pub ssl_mode: PgSslMode,
}

impl DatabaseSettings {
    /// 環境変数から接続設定を読み込む
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// キーから値を引く関数を使って接続設定を組み立てる
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match get("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| SettingsError::InvalidValue {
                    key:   "DB_PORT",
                    value: raw,
                })?,
            None => DEFAULT_DB_PORT,
        };

        let ssl_mode = match get("DB_SSLMODE") {
            Some(raw) => raw
                .trim()
                .parse::<PgSslMode>()
                .map_err(|_| SettingsError::InvalidValue {
                    key:   "DB_SSLMODE",
                    value: raw,
                })?,
            None => PgSslMode::Require,
        };

        Ok(Self {
            host: get("DB_HOST"),
            name: get("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            user: get("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string()),
            password: get("DB_PASSWORD"),
            port,
            ssl_mode,
        })
    }

    /// 欠けている必須設定のキー名
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.host.is_none() {
            missing.push("DB_HOST");
        }
        if self.password.is_none() {
            missing.push("DB_PASSWORD");
        }
        missing
    }

    /// sqlx の接続オプションに変換する
    ///
    /// 必須設定が欠けている場合は設定不備エラーを返す。
    pub fn connect_options(&self) -> Result<PgConnectOptions, InfraError> {
        let (Some(host), Some(password)) = (&self.host, &self.password) else {
            return Err(InfraError::configuration(format!(
                "missing database settings: {}",
                self.missing().join(", ")
            )));
        };

        Ok(PgConnectOptions::new()
            .host(host)
            .port(self.port)
            .username(&self.user)
            .password(password)
            .database(&self.name)
            .ssl_mode(self.ssl_mode))
    }
}

// パスワードをログに出さない
impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("port", &self.port)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

// =============================================================================
// Database
// =============================================================================

/// データベースハンドル
///
/// 起動時に一度だけ作成し、クローンして各リポジトリで共有する。
#[derive(Clone, Debug)]
pub struct Database {
    state: DatabaseState,
}

#[derive(Clone, Debug)]
enum DatabaseState {
    Ready(PgPool),
    Unconfigured { reason: String },
}

impl Database {
    /// 接続設定からハンドルを作成する
    ///
    /// 接続は最初の取得要求まで行わない。必須設定が欠けている場合は
    /// 警告を出して設定不備を記憶する。
    pub fn new(settings: &DatabaseSettings) -> Self {
        match settings.connect_options() {
            Ok(options) => Self::from_pool(pool_options().connect_lazy_with(options)),
            Err(e) => {
                tracing::warn!(error = %e, "データベース設定が不完全です。DB を使う操作はすべて失敗します");
                Self {
                    state: DatabaseState::Unconfigured {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// 既存のプールからハンドルを作成する
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            state: DatabaseState::Ready(pool),
        }
    }

    /// スコープ付きコネクションを取得する
    ///
    /// 取得時の失敗（ネットワーク・認証・タイムアウト）はすべて接続エラーになる。
    pub async fn acquire(&self) -> Result<DbConnection, InfraError> {
        match &self.state {
            DatabaseState::Ready(pool) => {
                let conn = pool.acquire().await.map_err(InfraError::connection)?;
                Ok(DbConnection { conn })
            }
            DatabaseState::Unconfigured { reason } => Err(InfraError::configuration(reason.clone())),
        }
    }

    /// コネクションを取得してスキーマを作成する
    pub async fn initialize_schema(&self) -> Result<(), InfraError> {
        let mut conn = self.acquire().await?;
        initialize_schema(&mut conn).await
    }
}

/// アプリケーション用のプール設定
pub fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

// =============================================================================
// DbConnection
// =============================================================================

/// スコープ付き DB コネクション
///
/// ドロップ時にプールへ返却される。
pub struct DbConnection {
    conn: PoolConnection<Postgres>,
}

// PoolConnection<Postgres> と同じく PgConnection として使えるようにする
impl Deref for DbConnection {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl DerefMut for DbConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}

// =============================================================================
// スキーマ
// =============================================================================

const CREATE_RECIPES: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    id           SERIAL PRIMARY KEY,
    title        VARCHAR(255) NOT NULL,
    ingredients  TEXT DEFAULT '',
    instructions TEXT DEFAULT '',
    cooking_time INTEGER NOT NULL DEFAULT 0 CHECK (cooking_time >= 0),
    servings     INTEGER NOT NULL DEFAULT 1 CHECK (servings >= 1),
    created_at   TIMESTAMPTZ DEFAULT NOW()
)
"#;

const CREATE_TIMERS: &str = r#"
CREATE TABLE IF NOT EXISTS timers (
    id               SERIAL PRIMARY KEY,
    recipe_id        INTEGER NOT NULL REFERENCES recipes (id) ON DELETE CASCADE,
    step_number      INTEGER NOT NULL,
    step_description TEXT DEFAULT '',
    duration_minutes INTEGER NOT NULL CHECK (duration_minutes >= 0),
    active           BOOLEAN NOT NULL DEFAULT FALSE,
    created_at       TIMESTAMPTZ DEFAULT NOW()
)
"#;

const CREATE_TIMERS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_timers_recipe_step ON timers (recipe_id, step_number)";

/// テーブルが存在しなければ作成する
///
/// 何度実行しても結果は変わらない。既存のテーブル定義は変更しない。
#[tracing::instrument(skip_all, level = "debug")]
pub async fn initialize_schema(conn: &mut PgConnection) -> Result<(), InfraError> {
    for statement in [CREATE_RECIPES, CREATE_TIMERS, CREATE_TIMERS_INDEX] {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    tracing::info!("データベーススキーマを確認しました");
    Ok(())
}

/// サーバーのバージョン文字列を取得する（`SELECT version()`）
#[tracing::instrument(skip_all, level = "debug")]
pub async fn server_version(conn: &mut PgConnection) -> Result<String, InfraError> {
    let version = sqlx::query_scalar::<_, String>("SELECT version()")
        .fetch_one(&mut *conn)
        .await?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::InfraErrorKind;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<DatabaseSettings, SettingsError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DatabaseSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_from_lookup_未設定の項目にデフォルト値が入る() {
        let settings = settings_from(&[("DB_HOST", "db.local"), ("DB_PASSWORD", "secret")]).unwrap();

        assert_eq!(settings.host.as_deref(), Some("db.local"));
        assert_eq!(settings.name, "postgres");
        assert_eq!(settings.user, "postgres");
        assert_eq!(settings.port, DEFAULT_DB_PORT);
        assert!(matches!(settings.ssl_mode, PgSslMode::Require));
        assert!(settings.missing().is_empty());
    }

    #[test]
    fn test_from_lookup_sslmodeとポートを上書きできる() {
        let settings = settings_from(&[("DB_PORT", "6543"), ("DB_SSLMODE", "disable")]).unwrap();

        assert_eq!(settings.port, 6543);
        assert!(matches!(settings.ssl_mode, PgSslMode::Disable));
    }

    #[test]
    fn test_from_lookup_不正なポートはエラー() {
        let result = settings_from(&[("DB_PORT", "not-a-port")]);

        assert_eq!(
            result.err(),
            Some(SettingsError::InvalidValue {
                key:   "DB_PORT",
                value: "not-a-port".to_string(),
            })
        );
    }

    #[test]
    fn test_from_lookup_空文字列は未設定として扱う() {
        let settings = settings_from(&[("DB_HOST", ""), ("DB_PASSWORD", "  ")]).unwrap();

        assert_eq!(settings.missing(), vec!["DB_HOST", "DB_PASSWORD"]);
    }

    #[test]
    fn test_connect_options_必須設定の欠落は設定不備エラー() {
        let settings = settings_from(&[("DB_HOST", "db.local")]).unwrap();

        let err = settings.connect_options().unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::Configuration(_)));
        assert_eq!(err.to_string(), "missing database settings: DB_PASSWORD");
    }

    #[test]
    fn test_debug出力にパスワードが含まれない() {
        let settings = settings_from(&[("DB_HOST", "db.local"), ("DB_PASSWORD", "hunter2")]).unwrap();

        let debug = format!("{settings:?}");

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_acquire_設定不備のハンドルは接続せずに設定不備エラーを返す() {
        let settings = settings_from(&[]).unwrap();
        let database = Database::new(&settings);

        let err = database.acquire().await.err().unwrap();

        assert!(matches!(err.kind(), InfraErrorKind::Configuration(_)));
        assert_eq!(err.to_string(), "missing database settings: DB_HOST, DB_PASSWORD");
    }

    #[tokio::test]
    async fn test_initialize_schema_設定不備なら設定不備エラーを返す() {
        let database = Database::new(&settings_from(&[]).unwrap());

        let err = database.initialize_schema().await.unwrap_err();

        assert_eq!(err.kind().category(), "Configuration error");
    }
}
