//! # ReceptenApp ドメイン層
//!
//! レシピとステップタイマーのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: DB から復元された [`recipe::Recipe`] / [`timer::Timer`]
//! - **作成入力**: 検証済みの [`recipe::NewRecipe`] / [`timer::NewTimer`]。
//!   リクエスト由来の未検証値（`*Draft`）からのみ生成できる
//! - **ドメインエラー**: 入力検証の失敗とエンティティ不在を [`DomainError`] で表現する
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB）に一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use recepten_domain::recipe::RecipeDraft;
//!
//! let draft = RecipeDraft {
//!     title: Some("Pasta".to_string()),
//!     cooking_time: Some(20),
//!     servings: Some(2),
//!     ..Default::default()
//! };
//! let new_recipe = draft.validate().unwrap();
//! assert_eq!(new_recipe.ingredients(), "");
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod recipe;
pub mod timer;

pub use error::DomainError;
