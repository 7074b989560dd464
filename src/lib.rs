//! # xlsxmark
//!
//! Excelワークブックのテキストダンプとキーワードセルハイライトを行う
//! Rustライブラリ。
//!
//! ## 特徴
//!
//! - **テキストダンプ**: シートの全セルを正規化し、行ごとに半角
//!   スペース結合したテキスト（またはJSON）として出力
//! - **キーワードハイライト**: 正規化済みセル値がキーワードと完全
//!   一致するセルを単色塗りつぶしでハイライトし、ファイルへ書き戻し
//! - **全域的な正規化**: セル値の正規化は決して失敗せず、データの
//!   欠落は空文字列に縮退
//! - **スタイル共有の保護**: 共有スタイルレコードの複製と再束縛に
//!   より、一致していないセルの書式を巻き込まない
//!
//! ## クイックスタート
//!
//! ```rust,no_run
//! use xlsxmark::MarkerBuilder;
//!
//! fn main() -> Result<(), xlsxmark::XlsxMarkError> {
//!     let marker = MarkerBuilder::new()
//!         .with_sheet_name("シート1")
//!         .with_keywords(vec!["4".to_string()])
//!         .build()?;
//!
//!     // 読み込み → ダンプ → ハイライト → 書き戻し
//!     let report = marker.run("data.xlsx")?;
//!     print!("{}", report.dump);
//!     println!("highlighted {} cells", report.marked.len());
//!     Ok(())
//! }
//! ```
//!
//! ## 低レベルAPI
//!
//! ファサードを使わず、各段階を個別に呼び出すこともできます。
//!
//! ```rust,no_run
//! use xlsxmark::{workbook, KeywordHighlighter, SheetDumper};
//!
//! # fn main() -> Result<(), xlsxmark::XlsxMarkError> {
//! let mut book = workbook::load("data.xlsx")?;
//! let mut grid = workbook::read_grid(&book, "シート1")?;
//!
//! let dumper = SheetDumper::new();
//! print!("{}", dumper.dump(&grid)?);
//!
//! let highlighter = KeywordHighlighter::new(vec!["4".to_string()]);
//! let marked = highlighter.mark(&mut grid);
//! let ws = workbook::sheet_by_name_mut(&mut book, "シート1")?;
//! highlighter.apply(ws, &marked);
//!
//! workbook::save(&book, "data.xlsx")?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod builder;
pub mod dump;
pub mod error;
pub mod grid;
pub mod highlight;
pub mod normalizer;
pub mod types;
pub mod workbook;

pub use api::{DateFormat, DumpFormat};
pub use builder::{MarkReport, Marker, MarkerBuilder, DEFAULT_SHEET_NAME};
pub use dump::SheetDumper;
pub use error::XlsxMarkError;
pub use grid::{GridCell, SheetGrid};
pub use highlight::{KeywordHighlighter, DEFAULT_HIGHLIGHT_COLOR};
pub use normalizer::CellValueNormalizer;
pub use types::{
    CellCoord, CellRange, CellStyle, CellValue, Color, Fill, MergedRegion, RichTextRun,
};
