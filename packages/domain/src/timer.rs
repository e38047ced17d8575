//! # ステップタイマー
//!
//! レシピの各ステップに紐づく所要時間と有効フラグ。
//!
//! タイマーはデータであり、カウントダウンを実行するものではない。
//! 作成後に変化するのは `active` フラグのみで、それもトグル操作でしか変わらない。

use chrono::{DateTime, Utc};

use crate::{DomainError, recipe::RecipeId};

define_serial_id! {
    /// タイマーの一意識別子（`timers.id`）
    pub struct TimerId;
}

/// リクエストから受け取った未検証のタイマー入力
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerDraft {
    pub recipe_id:        Option<i32>,
    pub step_number:      Option<i32>,
    pub duration_minutes: Option<i32>,
    pub step_description: Option<String>,
}

impl TimerDraft {
    /// 入力を検証して [`NewTimer`] を返す
    ///
    /// `recipe_id`, `step_number`, `duration_minutes` は必須。
    /// レシピの存在確認は行わない（DB の外部キー制約に委ねる）。
    pub fn validate(self) -> Result<NewTimer, DomainError> {
        let recipe_id = self
            .recipe_id
            .ok_or_else(|| DomainError::required("recipe_id"))?;
        let step_number = self
            .step_number
            .ok_or_else(|| DomainError::required("step_number"))?;
        let duration_minutes = self
            .duration_minutes
            .ok_or_else(|| DomainError::required("duration_minutes"))?;

        if duration_minutes < 0 {
            return Err(DomainError::Validation(
                "duration_minutes must not be negative".to_string(),
            ));
        }

        Ok(NewTimer {
            recipe_id: RecipeId::from_i32(recipe_id),
            step_number,
            duration_minutes,
            step_description: self.step_description.unwrap_or_default(),
        })
    }
}

/// 検証済みのタイマー作成入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimer {
    recipe_id:        RecipeId,
    step_number:      i32,
    duration_minutes: i32,
    step_description: String,
}

impl NewTimer {
    pub fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    pub fn step_number(&self) -> i32 {
        self.step_number
    }

    pub fn duration_minutes(&self) -> i32 {
        self.duration_minutes
    }

    pub fn step_description(&self) -> &str {
        &self.step_description
    }
}

/// タイマーエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    id:               TimerId,
    recipe_id:        RecipeId,
    step_number:      i32,
    step_description: String,
    duration_minutes: i32,
    active:           bool,
    created_at:       Option<DateTime<Utc>>,
}

impl Timer {
    /// データベースからタイマーを復元する
    pub fn from_db(
        id: TimerId,
        recipe_id: RecipeId,
        step_number: i32,
        step_description: String,
        duration_minutes: i32,
        active: bool,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            recipe_id,
            step_number,
            step_description,
            duration_minutes,
            active,
            created_at,
        }
    }

    /// 作成入力からエンティティを組み立てる（`active` は常に `false` で始まる）
    pub fn from_new(id: TimerId, new: NewTimer, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            recipe_id: new.recipe_id,
            step_number: new.step_number,
            step_description: new.step_description,
            duration_minutes: new.duration_minutes,
            active: false,
            created_at: Some(created_at),
        }
    }

    /// `active` を反転したタイマーを返す
    pub fn toggled(&self) -> Self {
        Self {
            active: !self.active,
            ..self.clone()
        }
    }

    // --- ゲッター ---

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    pub fn step_number(&self) -> i32 {
        self.step_number
    }

    pub fn step_description(&self) -> &str {
        &self.step_description
    }

    pub fn duration_minutes(&self) -> i32 {
        self.duration_minutes
    }

    pub fn is_active(&self) -> bool {
        self.active
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

    fn complete_draft() -> TimerDraft {
        TimerDraft {
            recipe_id:        Some(1),
            step_number:      Some(1),
            duration_minutes: Some(5),
            step_description: None,
        }
    }

    #[test]
    fn test_validate_step_descriptionは省略時に空文字列になる() {
        let new_timer = complete_draft().validate().unwrap();

        assert_eq!(new_timer.recipe_id(), RecipeId::from_i32(1));
        assert_eq!(new_timer.step_number(), 1);
        assert_eq!(new_timer.duration_minutes(), 5);
        assert_eq!(new_timer.step_description(), "");
    }

    #[rstest]
    #[case::recipe_id(TimerDraft { recipe_id: None, ..complete_draft() }, "recipe_id")]
    #[case::step_number(TimerDraft { step_number: None, ..complete_draft() }, "step_number")]
    #[case::duration(
        TimerDraft { duration_minutes: None, ..complete_draft() },
        "duration_minutes"
    )]
    fn test_validate_必須フィールドの欠落はエラー(
        #[case] draft: TimerDraft,
        #[case] field: &str,
    ) {
        assert_eq!(draft.validate(), Err(DomainError::required(field)));
    }

    #[test]
    fn test_validate_負のdurationはエラー() {
        let draft = TimerDraft {
            duration_minutes: Some(-1),
            ..complete_draft()
        };

        assert!(matches!(draft.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_from_newでactiveはfalseから始まる() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let timer = Timer::from_new(TimerId::from_i32(9), complete_draft().validate().unwrap(), now);

        assert!(!timer.is_active());
        assert_eq!(timer.id(), TimerId::from_i32(9));
    }

    #[test]
    fn test_toggledを2回適用すると元に戻る() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let timer = Timer::from_new(TimerId::from_i32(1), complete_draft().validate().unwrap(), now);

        let once = timer.toggled();
        let twice = once.toggled();

        assert!(once.is_active());
        assert_eq!(twice, timer);
    }
}
