//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - レスポンスボディは `{ "error": "<メッセージ>" }` の 1 フィールドのみ
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は api クレートの責務（shared に axum 依存を入れない）
//! - HTTP ステータスはボディに含めない（ステータスラインで表現する）

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// クライアントに返すエラーボディ。`error` には人間が読める診断メッセージを格納する。
///
/// ## 使用例
///
/// ```
/// use recepten_shared::ErrorResponse;
///
/// let body = ErrorResponse::new("Recipe not found");
/// assert_eq!(body.error, "Recipe not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// 任意のメッセージからエラーレスポンスを作成する
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// カテゴリ名と詳細を `"{category}: {detail}"` 形式で連結する
    ///
    /// 5xx 系で「何が起きたか」と「ドライバが返した詳細」を両方返すために使う。
    pub fn with_detail(category: &str, detail: impl std::fmt::Display) -> Self {
        Self::new(format!("{category}: {detail}"))
    }
}
