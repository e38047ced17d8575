//! # API エラー定義
//!
//! ハンドラから返されるエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## マッピング
//!
//! | 発生元 | ApiError | HTTP |
//! |--------|----------|------|
//! | 入力検証・不正な JSON・不正なパス ID | `BadRequest` | 400 |
//! | エンティティ不在 | `NotFound` | 404 |
//! | 設定不備・接続失敗・制約違反・クエリ失敗 | `Infra` | 500 |
//!
//! レスポンスボディはすべて `{"error": "..."}`。
//! 500 の場合は `"<カテゴリ>: <詳細>"` の形でドライバのメッセージを含める。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recepten_domain::DomainError;
use recepten_infra::InfraError;
use recepten_shared::ErrorResponse;
use thiserror::Error;

/// API 層で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 不正なリクエスト（400）
    #[error("{0}")]
    BadRequest(String),

    /// リソースが見つからない（404）
    #[error("{0}")]
    NotFound(String),

    /// インフラ層のエラー（500）
    #[error("{category}: {0}", category = .0.kind().category())]
    Infra(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => ApiError::BadRequest(msg),
            DomainError::NotFound { entity_type, .. } => {
                ApiError::NotFound(format!("{entity_type} not found"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg.clone())),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg.clone())),
            ApiError::Infra(e) => {
                tracing::error!(
                    error.category = e.kind().category(),
                    error.kind = ?e.kind(),
                    span_trace = %e.span_trace(),
                    "インフラ層でエラーが発生しました: {e}"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_detail(e.kind().category(), e),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
