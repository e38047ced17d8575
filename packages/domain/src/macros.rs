/// DB の SERIAL 列に対応する整数 ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i32` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `from_i32()`: DB / パスパラメータの値から復元
/// - `as_i32()`: 内部値の取得
///
/// ID は DB が採番するため、`new()` や `Default` は提供しない。
///
/// # 使用例
///
/// ```rust
/// use recepten_domain::recipe::RecipeId;
///
/// let id = RecipeId::from_i32(42);
/// assert_eq!(id.as_i32(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
macro_rules! define_serial_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(i32);

        impl $Name {
            /// 既存の整数値から ID を作成する
            pub fn from_i32(value: i32) -> Self {
                Self(value)
            }

            /// 内部の整数値を取得する
            pub fn as_i32(&self) -> i32 {
                self.0
            }
        }
    };
}
