//! # レシピ
//!
//! 料理名・材料・手順・調理時間・人数を持つレシピのドメインモデル。
//!
//! ## ライフサイクル
//!
//! レシピは作成と参照のみ。API から更新・削除されることはない
//! （削除は DB の `ON DELETE CASCADE` 経由でのみ発生する）。
//!
//! ## 作成フロー
//!
//! ```text
//! リクエスト JSON → RecipeDraft（未検証）→ validate() → NewRecipe（検証済み）→ INSERT
//! ```

use chrono::{DateTime, Utc};

use crate::DomainError;

define_serial_id! {
    /// レシピの一意識別子（`recipes.id`）
    pub struct RecipeId;
}

/// タイトルの最大文字数（DB: `VARCHAR(255)`）
const MAX_TITLE_LENGTH: usize = 255;

/// 調理時間のデフォルト値（分）
pub const DEFAULT_COOKING_TIME: i32 = 0;

/// 人数のデフォルト値
pub const DEFAULT_SERVINGS: i32 = 1;

// =========================================================================
// RecipeTitle（タイトル）
// =========================================================================

/// レシピのタイトル（値オブジェクト）
///
/// # 不変条件
///
/// - 空白のみではない
/// - 最大 255 文字
///
/// 値は入力どおりに保持する（前後の空白も除去しない）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation("title must not be empty".to_string()));
        }

        if value.chars().count() > MAX_TITLE_LENGTH {
            return Err(DomainError::Validation(format!(
                "title must be at most {MAX_TITLE_LENGTH} characters"
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =========================================================================
// RecipeDraft / NewRecipe（作成入力）
// =========================================================================

/// リクエストから受け取った未検証のレシピ入力
///
/// すべて `Option` で受け、欠落をバリデーションエラーとして扱えるようにする。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    pub title:        Option<String>,
    pub ingredients:  Option<String>,
    pub instructions: Option<String>,
    pub cooking_time: Option<i32>,
    pub servings:     Option<i32>,
}

impl RecipeDraft {
    /// 入力を検証し、デフォルト値を適用した [`NewRecipe`] を返す
    ///
    /// - `title`: 必須
    /// - `ingredients` / `instructions`: 省略時は空文字列
    /// - `cooking_time`: 省略時は 0。負数は不可
    /// - `servings`: 省略時は 1。1 未満は不可
    pub fn validate(self) -> Result<NewRecipe, DomainError> {
        let title = self.title.ok_or_else(|| DomainError::required("title"))?;
        let title = RecipeTitle::new(title)?;

        let cooking_time = self.cooking_time.unwrap_or(DEFAULT_COOKING_TIME);
        if cooking_time < 0 {
            return Err(DomainError::Validation(
                "cooking_time must not be negative".to_string(),
            ));
        }

        let servings = self.servings.unwrap_or(DEFAULT_SERVINGS);
        if servings < 1 {
            return Err(DomainError::Validation(
                "servings must be at least 1".to_string(),
            ));
        }

        Ok(NewRecipe {
            title,
            ingredients: self.ingredients.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
            cooking_time,
            servings,
        })
    }
}

/// 検証済みのレシピ作成入力
///
/// [`RecipeDraft::validate`] からのみ生成できる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    title:        RecipeTitle,
    ingredients:  String,
    instructions: String,
    cooking_time: i32,
    servings:     i32,
}

impl NewRecipe {
    pub fn title(&self) -> &RecipeTitle {
        &self.title
    }

    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn cooking_time(&self) -> i32 {
        self.cooking_time
    }

    pub fn servings(&self) -> i32 {
        self.servings
    }
}

// =========================================================================
// Recipe（レシピエンティティ）
// =========================================================================

/// レシピエンティティ
///
/// 永続化済みのレシピ。タイマーは含まない（取得時にユースケース層で合成する）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id:           RecipeId,
    title:        String,
    ingredients:  String,
    instructions: String,
    cooking_time: i32,
    servings:     i32,
    created_at:   Option<DateTime<Utc>>,
}

impl Recipe {
    /// データベースからレシピを復元する
    pub fn from_db(
        id: RecipeId,
        title: String,
        ingredients: String,
        instructions: String,
        cooking_time: i32,
        servings: i32,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            title,
            ingredients,
            instructions,
            cooking_time,
            servings,
            created_at,
        }
    }

    /// 採番済み ID と作成時刻を与えて、作成入力からエンティティを組み立てる
    pub fn from_new(id: RecipeId, new: NewRecipe, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title.0,
            ingredients: new.ingredients,
            instructions: new.instructions,
            cooking_time: new.cooking_time,
            servings: new.servings,
            created_at: Some(created_at),
        }
    }

    // --- ゲッター ---

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn cooking_time(&self) -> i32 {
        self.cooking_time
    }

    pub fn servings(&self) -> i32 {
        self.servings
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn draft_with_title(title: &str) -> RecipeDraft {
        RecipeDraft {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_省略したフィールドにデフォルト値が入る() {
        let new_recipe = draft_with_title("Pasta").validate().unwrap();

        assert_eq!(new_recipe.title().as_str(), "Pasta");
        assert_eq!(new_recipe.ingredients(), "");
        assert_eq!(new_recipe.instructions(), "");
        assert_eq!(new_recipe.cooking_time(), DEFAULT_COOKING_TIME);
        assert_eq!(new_recipe.servings(), DEFAULT_SERVINGS);
    }

    #[test]
    fn test_validate_指定したフィールドがそのまま使われる() {
        let draft = RecipeDraft {
            title:        Some("Pasta".to_string()),
            ingredients:  Some("spaghetti, tomato".to_string()),
            instructions: Some("boil".to_string()),
            cooking_time: Some(20),
            servings:     Some(2),
        };

        let new_recipe = draft.validate().unwrap();

        assert_eq!(new_recipe.ingredients(), "spaghetti, tomato");
        assert_eq!(new_recipe.instructions(), "boil");
        assert_eq!(new_recipe.cooking_time(), 20);
        assert_eq!(new_recipe.servings(), 2);
    }

    #[test]
    fn test_validate_titleが欠落している場合はエラー() {
        let result = RecipeDraft::default().validate();

        assert_eq!(result, Err(DomainError::required("title")));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_validate_空のtitleはエラー(#[case] title: &str) {
        let result = draft_with_title(title).validate();

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_validate_titleは前後の空白も含めて入力どおりに保持される() {
        let new_recipe = draft_with_title("  Soep  ").validate().unwrap();

        assert_eq!(new_recipe.title().as_str(), "  Soep  ");
    }

    #[test]
    fn test_validate_255文字を超えるtitleはエラー() {
        let long = "a".repeat(MAX_TITLE_LENGTH + 1);

        assert!(draft_with_title(&long).validate().is_err());
        assert!(draft_with_title(&"a".repeat(MAX_TITLE_LENGTH)).validate().is_ok());
    }

    #[rstest]
    #[case(Some(-1), None)]
    #[case(None, Some(0))]
    #[case(None, Some(-3))]
    fn test_validate_範囲外の数値はエラー(
        #[case] cooking_time: Option<i32>,
        #[case] servings: Option<i32>,
    ) {
        let draft = RecipeDraft {
            cooking_time,
            servings,
            ..draft_with_title("Pasta")
        };

        assert!(matches!(draft.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_from_newで作成入力の値がエンティティに引き継がれる() {
        let new_recipe = draft_with_title("Pasta").validate().unwrap();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let recipe = Recipe::from_new(RecipeId::from_i32(3), new_recipe, now);

        assert_eq!(recipe.id(), RecipeId::from_i32(3));
        assert_eq!(recipe.title(), "Pasta");
        assert_eq!(recipe.servings(), 1);
        assert_eq!(recipe.created_at(), Some(now));
    }
}
