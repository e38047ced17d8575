//! # ヘルスチェック共通型
//!
//! `/api/health` と `/api/db-test` のレスポンス型を提供する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// `status` は常に `"ok"`、`timestamp` は応答時刻（RFC 3339）。
///
/// ## 使用例
///
/// ```
/// use recepten_shared::HealthResponse;
///
/// let response = HealthResponse::ok(chrono::Utc::now());
/// assert_eq!(response.status, "ok");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（常に `"ok"`）
    pub status:    String,
    /// 人間向けのメッセージ
    pub message:   String,
    /// 応答時刻（RFC 3339）
    pub timestamp: String,
}

impl HealthResponse {
    /// 稼働中を表すレスポンスを作成する
    pub fn ok(now: DateTime<Utc>) -> Self {
        Self {
            status:    "ok".to_string(),
            message:   "ReceptenApp API is running!".to_string(),
            timestamp: now.to_rfc3339(),
        }
    }
}

/// データベース疎通確認の結果
///
/// 成功時は `{"status": "Connected", "version": ...}`、
/// 失敗時は `{"status": "Failed" | "Error", "error": ...}` にシリアライズされる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum DbTestResponse {
    /// 接続とクエリに成功した
    Connected { version: String },
    /// 接続そのものを取得できなかった
    Failed { error: String },
    /// 接続は取得できたがクエリに失敗した
    Error { error: String },
}
