//! # ReceptenApp API サーバー
//!
//! ## 起動手順
//!
//! 1. `.env` と環境変数から設定を読み込む
//! 2. トレーシングを初期化する
//! 3. DB ハンドルを作成し、スキーマを確認する（失敗してもログのみで起動を続ける）
//! 4. ルーターを構築して待ち受けを開始する（Ctrl-C / SIGTERM で終了）

use anyhow::Context as _;
use recepten_api::{
    app_builder::{AppDependencies, build_router, shutdown_signal},
    config::ApiConfig,
};
use recepten_infra::db::Database;
use recepten_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("recepten-api");
    init_tracing(&tracing_config);

    let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::info!(
        service = %tracing_config.service_name,
        database = ?config.database,
        "API サーバーを起動します: {}",
        config.bind_address()
    );

    let database = Database::new(&config.database);
    match database.initialize_schema().await {
        Ok(()) => tracing::info!("データベースを初期化しました"),
        Err(e) => tracing::error!(
            error = %e,
            category = e.kind().category(),
            "データベースの初期化に失敗しました。DB を使うリクエストは失敗します"
        ),
    }

    let app = build_router(AppDependencies::postgres(database));

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("{} で待ち受けできません", config.bind_address()))?;
    tracing::info!("待ち受けを開始しました: {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("サーバーが異常終了しました")?;

    tracing::info!("API サーバーを停止しました");
    Ok(())
}
