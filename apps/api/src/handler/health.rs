//! # ヘルスチェックハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/health` - プロセスの稼働確認（DB には触れない）
//! - `GET /api/db-test` - DB への接続と `SELECT version()` の確認

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use recepten_domain::clock::Clock;
use recepten_infra::db::{self, Database};
use recepten_shared::{DbTestResponse, HealthResponse};

/// ヘルスチェック API の共有状態
pub struct HealthState {
    pub database: Database,
    pub clock:    Arc<dyn Clock>,
}

/// GET /api/health
///
/// 常に 200 を返す。
pub async fn health_check(State(state): State<Arc<HealthState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.clock.now()))
}

/// GET /api/db-test
///
/// ## レスポンス
///
/// - `200 OK`: `{"status": "Connected", "version": ...}`
/// - `500`: 接続を取得できない場合は `Failed`、クエリに失敗した場合は `Error`
#[tracing::instrument(skip_all)]
pub async fn db_test(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let mut conn = match state.database.acquire().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(error = %e, "DB 接続を取得できませんでした");
            let body = DbTestResponse::Failed {
                error: format!("Could not create connection: {e}"),
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body));
        }
    };

    match db::server_version(&mut conn).await {
        Ok(version) => (StatusCode::OK, Json(DbTestResponse::Connected { version })),
        Err(e) => {
            tracing::error!(error = %e, "バージョン取得クエリに失敗しました");
            let body = DbTestResponse::Error {
                error: e.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use recepten_domain::clock::FixedClock;
    use recepten_infra::db::DatabaseSettings;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        let settings = DatabaseSettings::from_lookup(|_| None).unwrap();
        let state = Arc::new(HealthState {
            database: Database::new(&settings),
            clock:    Arc::new(FixedClock::new(
                DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            )),
        });
        Router::new()
            .route("/api/health", get(health_check))
            .route("/api/db-test", get(db_test))
            .with_state(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_checkは固定時刻のレスポンスを返す() {
        let (status, body) = get_json(app(), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "status": "ok",
                "message": "ReceptenApp API is running!",
                "timestamp": "2023-11-14T22:13:20+00:00",
            })
        );
    }

    #[tokio::test]
    async fn test_db_test_設定不備ならfailedの500を返す() {
        let (status, body) = get_json(app(), "/api/db-test").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "Failed");
        assert_eq!(
            body["error"],
            "Could not create connection: missing database settings: DB_HOST, DB_PASSWORD"
        );
    }
}
