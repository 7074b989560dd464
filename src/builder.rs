//! Builder Module
//!
//! マーカーの生成を簡潔に行うためのビルダーパターン実装。
//! 設定の検証は`build()`時に一括して行い、生成済みの[`Marker`]は
//! 常に有効な設定を持ちます。

use std::fmt::Write as _;
use std::path::Path;

use chrono::NaiveDate;

use crate::api::{DateFormat, DumpFormat};
use crate::dump::SheetDumper;
use crate::error::XlsxMarkError;
use crate::highlight::{KeywordHighlighter, DEFAULT_HIGHLIGHT_COLOR};
use crate::normalizer::CellValueNormalizer;
use crate::types::{CellCoord, Color, Fill};
use crate::workbook;

/// デフォルトの対象シート名
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// マーカービルダー
///
/// [`Marker`]を柔軟に設定するためのビルダーです。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxmark::{MarkerBuilder, DumpFormat};
///
/// # fn main() -> Result<(), xlsxmark::XlsxMarkError> {
/// let marker = MarkerBuilder::new()
///     .with_sheet_name("シート1")
///     .with_keywords(vec!["4".to_string()])
///     .with_highlight_color("00FF00")
///     .with_dump_format(DumpFormat::Text)
///     .build()?;
///
/// let report = marker.run("data.xlsx")?;
/// print!("{}", report.dump);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MarkerBuilder {
    sheet_name: String,
    keywords: Vec<String>,
    highlight_color: String,
    dump_format: DumpFormat,
    date_format: DateFormat,
}

impl MarkerBuilder {
    /// デフォルト設定のビルダーを生成
    pub fn new() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            keywords: Vec::new(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            dump_format: DumpFormat::default(),
            date_format: DateFormat::default(),
        }
    }

    /// 対象シート名を設定
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// ハイライト対象のキーワードを設定
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// ハイライト色を設定（16進RGBまたはARGB文字列、例: "00FF00"）
    pub fn with_highlight_color(mut self, color: impl Into<String>) -> Self {
        self.highlight_color = color.into();
        self
    }

    /// ダンプの出力形式を設定
    pub fn with_dump_format(mut self, format: DumpFormat) -> Self {
        self.dump_format = format;
        self
    }

    /// 日時の出力形式を設定
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = format;
        self
    }

    /// 設定を検証してマーカーを生成
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxMarkError::Config`: ハイライト色が16進6桁/8桁の文字列
    ///   でない場合、またはカスタム日付形式が不正な場合
    pub fn build(self) -> Result<Marker, XlsxMarkError> {
        validate_color(&self.highlight_color)?;
        validate_date_format(&self.date_format)?;

        let normalizer = CellValueNormalizer::with_date_format(self.date_format);
        let fill = Fill::Solid(Color::from_argb(self.highlight_color));

        Ok(Marker {
            sheet_name: self.sheet_name,
            dumper: SheetDumper::with_options(self.dump_format, normalizer.clone()),
            highlighter: KeywordHighlighter::with_options(self.keywords, fill, normalizer),
        })
    }
}

impl Default for MarkerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_color(color: &str) -> Result<(), XlsxMarkError> {
    let valid = matches!(color.len(), 6 | 8) && color.chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(XlsxMarkError::Config(format!(
            "Invalid highlight color: '{}' (expected 6 or 8 hex digits)",
            color
        )));
    }
    Ok(())
}

fn validate_date_format(format: &DateFormat) -> Result<(), XlsxMarkError> {
    let DateFormat::Custom(format_str) = format else {
        return Ok(());
    };

    // 代表値で実際にフォーマットし、書けることを確認する
    let sample = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| XlsxMarkError::Config("Invalid sample date".to_string()))?;
    let mut rendered = String::new();
    if write!(rendered, "{}", sample.format(format_str)).is_err() {
        return Err(XlsxMarkError::Config(format!(
            "Invalid date format: '{}'",
            format_str
        )));
    }
    Ok(())
}

/// マーカー
///
/// 1つのワークブックに対するダンプとキーワードハイライトの
/// ファサードです。[`MarkerBuilder`]で生成します。
#[derive(Debug, Clone)]
pub struct Marker {
    sheet_name: String,
    dumper: SheetDumper,
    highlighter: KeywordHighlighter,
}

/// [`Marker::run`]の実行結果
#[derive(Debug, Clone)]
pub struct MarkReport {
    /// 対象シートのダンプ文字列
    pub dump: String,

    /// ハイライトされたセルの座標（走査順）
    pub marked: Vec<CellCoord>,
}

impl Marker {
    /// 対象シートの内容をダンプ
    ///
    /// ファイルは変更しません。
    pub fn dump<P: AsRef<Path>>(&self, path: P) -> Result<String, XlsxMarkError> {
        let book = workbook::load(path)?;
        let grid = workbook::read_grid(&book, &self.sheet_name)?;
        self.dumper.dump(&grid)
    }

    /// キーワードに一致するセルをハイライトしてファイルへ書き戻す
    ///
    /// ハイライトされたセルの座標を走査順で返します。
    pub fn highlight_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<CellCoord>, XlsxMarkError> {
        let mut book = workbook::load(&path)?;
        let marked = self.highlight_book(&mut book)?;
        workbook::save(&book, &path)?;
        Ok(marked)
    }

    /// ダンプとハイライトを1回の読み込みで実行
    ///
    /// 処理順序: 読み込み → ダンプ → ハイライト → 書き戻し。
    /// ダンプはハイライト前のセル値を反映します（ハイライトは
    /// 書式のみの変更のため、値は変わりません）。
    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<MarkReport, XlsxMarkError> {
        let mut book = workbook::load(&path)?;
        let grid = workbook::read_grid(&book, &self.sheet_name)?;
        let dump = self.dumper.dump(&grid)?;

        let marked = self.highlight_book(&mut book)?;
        workbook::save(&book, &path)?;

        Ok(MarkReport { dump, marked })
    }

    fn highlight_book(
        &self,
        book: &mut umya_spreadsheet::Spreadsheet,
    ) -> Result<Vec<CellCoord>, XlsxMarkError> {
        let mut grid = workbook::read_grid(book, &self.sheet_name)?;
        let marked = self.highlighter.mark(&mut grid);

        let ws = workbook::sheet_by_name_mut(book, &self.sheet_name)?;
        self.highlighter.apply(ws, &marked);
        Ok(marked)
    }
}
