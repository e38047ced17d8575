//! # ユースケース層
//!
//! ハンドラとリポジトリの間のオーケストレーションを担当する。
//! リポジトリはトレイトオブジェクト（`Arc<dyn ...>`）で受け取り、
//! テストではインメモリのモックに差し替える。

pub mod recipe;
pub mod timer;

pub use recipe::{RecipeUseCaseImpl, RecipeWithTimers};
pub use timer::TimerUseCaseImpl;
