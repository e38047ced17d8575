//! # カスタムエクストラクタ
//!
//! axum 標準の `Json` / `Path` の拒否レスポンス（プレーンテキストの 4xx）を
//! [`ApiError::BadRequest`] に置き換え、すべてのエラーを `{"error": ...}` で返す。

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON リクエストボディ
///
/// Content-Type の不一致・構文エラー・型の不一致はすべて 400 になる。
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::BadRequest(format!("invalid JSON body: {}", rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}

/// パスの整数 ID（`/api/recipes/{id}` など）
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest("missing id in path".to_string()))?;

        let id = raw
            .parse::<i32>()
            .map_err(|_| ApiError::BadRequest(format!("id must be an integer: {raw:?}")))?;
        Ok(Self(id))
    }
}
