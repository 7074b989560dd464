//! Normalizer Module
//!
//! セル値の正規化処理を提供するモジュール。
//! 外部ライブラリ由来の生のセル値（[`CellValue`]）を、表示用の
//! 正準文字列1つに写像します。

use std::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::api::DateFormat;
use crate::types::CellValue;

/// ISO 8601タイムスタンプの書式
const ISO_8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// セル値ノーマライザー
///
/// 1セルの値を表示文字列へ写像する純関数のファサードです。
///
/// # 契約
///
/// - 全域的: どの`CellValue`に対しても必ず文字列を返し、決して
///   失敗しません。データの欠落は空文字列に縮退します。
/// - 解決順序（最初に一致したものが勝つ）:
///   1. 結合セルの親以外 → `""`
///   2. 空セル → `""`
///   3. 数値 → 10進文字列（ロケール非依存、桁区切りなし）
///   4. 文字列 → そのまま
///   5. 日時 → ISO 8601タイムスタンプ文字列
///   6. ハイパーリンク → 表示テキスト（URLではない）
///   7. 数式・共有数式・配列数式 → キャッシュ結果の文字列。なければ`""`
///   8. リッチテキスト → 各ランのテキストを区切りなしで連結
///   9. 論理値 → `"true"` / `"false"`
///   10. エラー値 → エラーコード文字列
///   11. それ以外 → `""`
///
/// # 使用例
///
/// ```rust
/// use xlsxmark::{CellValue, CellValueNormalizer};
///
/// let normalizer = CellValueNormalizer::new();
/// assert_eq!(normalizer.normalize(&CellValue::Number(4.0)), "4");
/// assert_eq!(normalizer.normalize(&CellValue::Boolean(true)), "true");
/// assert_eq!(normalizer.normalize(&CellValue::Empty), "");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CellValueNormalizer {
    /// 日時の出力形式
    date_format: DateFormat,
}

impl CellValueNormalizer {
    /// デフォルト設定（ISO 8601日時）のノーマライザーを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 日時の出力形式を指定したノーマライザーを生成
    ///
    /// ここでは書式の検証を行いません。chronoが描画を拒否する
    /// カスタム書式はISO 8601表現に縮退します（事前に検証したい
    /// 場合は[`crate::MarkerBuilder::build`]を使用してください）。
    pub fn with_date_format(date_format: DateFormat) -> Self {
        Self { date_format }
    }

    /// セル値を表示文字列に正規化
    ///
    /// # 引数
    ///
    /// * `value` - 正規化するセル値
    ///
    /// # 戻り値
    ///
    /// 正規化済みの表示文字列。欠落データは空文字列になります。
    pub fn normalize(&self, value: &CellValue) -> String {
        match value {
            // 結合セルの親以外は独立した値を持たない
            CellValue::MergedReference { .. } => String::new(),

            CellValue::Empty => String::new(),

            CellValue::Number(n) => n.to_string(),

            CellValue::Text(s) => s.clone(),

            CellValue::DateTime(dt) => self.format_datetime(dt),

            // URLではなく表示テキストを返す
            CellValue::Hyperlink { display } => display.clone(),

            CellValue::Formula { cached }
            | CellValue::SharedFormula { cached }
            | CellValue::ArrayFormulaResult { cached } => match cached {
                Some(result) => self.normalize(result),
                None => String::new(),
            },

            CellValue::RichText(runs) => {
                runs.iter().map(|run| run.text.as_str()).collect()
            }

            CellValue::Boolean(b) => b.to_string(),

            CellValue::ErrorValue { code } => code.clone(),
        }
    }

    /// 日時を設定された書式で文字列化
    ///
    /// カスタム書式はバッファへの書き込みで描画し、chronoが書式を
    /// 拒否した場合はISO 8601表現に縮退します。`to_string()`は不正な
    /// 書式指定子でパニックするため使いません（正規化は失敗しない）。
    fn format_datetime(&self, dt: &NaiveDateTime) -> String {
        if let DateFormat::Custom(format_str) = &self.date_format {
            let mut rendered = String::new();
            if write!(rendered, "{}", dt.format(format_str)).is_ok() {
                return rendered;
            }
        }
        dt.format(ISO_8601_FORMAT).to_string()
    }
}
