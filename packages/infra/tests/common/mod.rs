//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するスキーマ準備とエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use recepten_domain::{
    recipe::{NewRecipe, RecipeDraft},
    timer::{NewTimer, TimerDraft},
};
use recepten_infra::db::{Database, initialize_schema};
use sqlx::PgPool;

/// `#[sqlx::test]` が用意したプールにスキーマを作成し、ハンドルを返す
pub async fn setup_database(pool: PgPool) -> Database {
    let mut conn = pool.acquire().await.unwrap();
    initialize_schema(&mut conn).await.unwrap();
    Database::from_pool(pool)
}

/// タイトルだけを指定した作成入力
pub fn recipe_titled(title: &str) -> NewRecipe {
    RecipeDraft {
        title: Some(title.to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap()
}

/// 所要時間 5 分のタイマー作成入力
pub fn timer_for(recipe_id: i32, step_number: i32) -> NewTimer {
    TimerDraft {
        recipe_id:        Some(recipe_id),
        step_number:      Some(step_number),
        duration_minutes: Some(5),
        step_description: Some(format!("step {step_number}")),
    }
    .validate()
    .unwrap()
}

/// 旧バージョンのサービスが作成していたスキーマ
///
/// `created_at` がタイムゾーンなしで、数値列と `active` は NULL を許す。
const LEGACY_SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE recipes (
        id SERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        ingredients TEXT,
        instructions TEXT,
        cooking_time INTEGER DEFAULT 0,
        servings INTEGER DEFAULT 1,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE timers (
        id SERIAL PRIMARY KEY,
        recipe_id INTEGER REFERENCES recipes(id) ON DELETE CASCADE,
        step_number INTEGER NOT NULL,
        step_description TEXT,
        duration_minutes INTEGER DEFAULT 0,
        active BOOLEAN DEFAULT FALSE,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
];

/// 旧スキーマのテーブルを先に作ってから `initialize_schema` を実行する
pub async fn setup_legacy_database(pool: PgPool) -> Database {
    for ddl in LEGACY_SCHEMA {
        sqlx::query(ddl).execute(&pool).await.unwrap();
    }
    setup_database(pool).await
}
