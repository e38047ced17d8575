//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//! ハンドラは入力の取り出し、ユースケースへの委譲、結果の JSON 化のみを行う。
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── health.rs   # /api/health, /api/db-test
//!     ├── recipe.rs   # /api/recipes
//!     └── timer.rs    # /api/timers
//! ```

pub mod health;
pub mod recipe;
pub mod timer;

pub use health::{HealthState, db_test, health_check};
pub use recipe::{RecipeState, create_recipe, get_recipe, list_recipes};
pub use timer::{TimerState, create_timer, toggle_timer};
