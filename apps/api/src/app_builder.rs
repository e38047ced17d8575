//! # ルーター構築
//!
//! 依存関係（DB ハンドル・リポジトリ・時計）からルーターを組み立てる。
//! 本番では PostgreSQL 実装、テストではインメモリのモックを注入する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use recepten_domain::clock::{Clock, SystemClock};
use recepten_infra::{
    db::Database,
    repository::{
        PostgresRecipeRepository,
        PostgresTimerRepository,
        RecipeRepository,
        TimerRepository,
    },
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handler::{
        HealthState,
        RecipeState,
        TimerState,
        create_recipe,
        create_timer,
        db_test,
        get_recipe,
        health_check,
        list_recipes,
        toggle_timer,
    },
    usecase::{RecipeUseCaseImpl, TimerUseCaseImpl},
};

/// ルーターが必要とする依存関係
pub struct AppDependencies {
    pub database:          Database,
    pub recipe_repository: Arc<dyn RecipeRepository>,
    pub timer_repository:  Arc<dyn TimerRepository>,
    pub clock:             Arc<dyn Clock>,
}

impl AppDependencies {
    /// PostgreSQL 実装のリポジトリとシステム時刻で組み立てる
    pub fn postgres(database: Database) -> Self {
        Self {
            recipe_repository: Arc::new(PostgresRecipeRepository::new(database.clone())),
            timer_repository: Arc::new(PostgresTimerRepository::new(database.clone())),
            clock: Arc::new(SystemClock),
            database,
        }
    }
}

/// 全エンドポイントを持つルーターを構築する
///
/// CORS はすべてのオリジンを許可する。
pub fn build_router(deps: AppDependencies) -> Router {
    let health_state = Arc::new(HealthState {
        database: deps.database,
        clock:    deps.clock,
    });
    let recipe_state = Arc::new(RecipeState {
        usecase: RecipeUseCaseImpl::new(deps.recipe_repository, deps.timer_repository.clone()),
    });
    let timer_state = Arc::new(TimerState {
        usecase: TimerUseCaseImpl::new(deps.timer_repository),
    });

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/db-test", get(db_test))
        .with_state(health_state)
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route("/api/recipes/{id}", get(get_recipe))
        .with_state(recipe_state)
        .route("/api/timers", post(create_timer))
        .route("/api/timers/{id}/toggle", post(toggle_timer))
        .with_state(timer_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Ctrl-C または SIGTERM を待つ
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C ハンドラを登録できませんでした");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラを登録できませんでした");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("シャットダウンシグナルを受信しました");
}
