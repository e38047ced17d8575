//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターン:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: 設定不備・接続失敗・制約違反・クエリ失敗などの種別
//!
//! API 層はエラー種別ごとにカテゴリ名を付けて 500 レスポンスに変換する。

use std::fmt;

use derive_more::Display;
use sqlx::error::ErrorKind as DbErrorKind;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// `From<sqlx::Error>` や convenience constructor で生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// 接続設定の不備（必須の環境変数が未設定など）
    ///
    /// この状態ではすべての接続取得がこのエラーを返す。
    #[error("{0}")]
    Configuration(String),

    /// 接続の確立・取得に失敗した
    #[error("{0}")]
    Connection(#[source] sqlx::Error),

    /// 外部キー・NOT NULL・CHECK・一意制約の違反
    #[error("{0}")]
    ConstraintViolation(String),

    /// 上記以外のクエリ失敗
    #[error("{0}")]
    Database(#[source] sqlx::Error),
}

impl InfraErrorKind {
    /// エラー種別のカテゴリ名（レスポンスの接頭辞に使う）
    pub fn category(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "Configuration error",
            Self::Connection(_) => "Connection error",
            Self::ConstraintViolation(_) => "Constraint violation",
            Self::Database(_) => "Database error",
        }
    }
}

// ===== InfraError のメソッド =====

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    fn with_kind(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    // ===== Convenience constructors =====

    /// 設定不備エラーを生成する
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::with_kind(InfraErrorKind::Configuration(msg.into()))
    }

    /// 接続エラーを生成する
    ///
    /// 接続取得時の失敗は、認証エラーのように DB 側から返るものも含めて
    /// すべて接続エラーとして扱う。
    pub fn connection(source: sqlx::Error) -> Self {
        Self::with_kind(InfraErrorKind::Connection(source))
    }

    /// 制約違反エラーを生成する
    pub fn constraint_violation(msg: impl Into<String>) -> Self {
        Self::with_kind(InfraErrorKind::ConstraintViolation(msg.into()))
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        if is_connection_failure(&source) {
            return Self::connection(source);
        }
        if let sqlx::Error::Configuration(cause) = &source {
            return Self::configuration(cause.to_string());
        }
        match constraint_message(&source) {
            Some(msg) => Self::constraint_violation(msg),
            None => Self::with_kind(InfraErrorKind::Database(source)),
        }
    }
}

fn is_connection_failure(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
    )
}

/// 制約違反ならドライバのメッセージ（制約名付き）を返す
fn constraint_message(error: &sqlx::Error) -> Option<String> {
    let sqlx::Error::Database(db_error) = error else {
        return None;
    };
    match db_error.kind() {
        DbErrorKind::UniqueViolation
        | DbErrorKind::ForeignKeyViolation
        | DbErrorKind::NotNullViolation
        | DbErrorKind::CheckViolation => {}
        _ => return None,
    }
    let message = match db_error.constraint() {
        Some(constraint) => format!("{} ({constraint})", db_error.message()),
        None => db_error.message().to_string(),
    };
    Some(message)
}
