//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// ダンプの出力形式
///
/// シートのセル値を文字列としてダンプする際の出力形式を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DumpFormat {
    /// プレーンテキスト形式（デフォルト）
    ///
    /// 各行のセルを半角スペース1個で結合し、各行を改行で終端します。
    ///
    /// # 出力例
    ///
    /// ```text
    /// a b c
    /// 1 2 3
    /// ```
    Text,

    /// JSON形式
    ///
    /// シート全体を1つのオブジェクトとして出力します。各行は列名
    /// （A, B, C, ...）をキーとするオブジェクトです。
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///   "sheet_name": "Sheet1",
    ///   "rows": [
    ///     {"A": "a", "B": "b", "C": "c"},
    ///     {"A": "1", "B": "2", "C": "3"}
    ///   ]
    /// }
    /// ```
    Json,
}

/// 日時の出力形式
///
/// 日時セルを正規化する際の出力形式を指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式（YYYY-MM-DDTHH:MM:SS）
    ///
    /// 例: `2025-11-20T09:30:00`
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxmark::{MarkerBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), xlsxmark::XlsxMarkError> {
    /// let marker = MarkerBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

impl Default for DateFormat {
    fn default() -> Self {
        DateFormat::Iso8601
    }
}

impl Default for DumpFormat {
    fn default() -> Self {
        DumpFormat::Text
    }
}
