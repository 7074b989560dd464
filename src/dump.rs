//! Dump Module
//!
//! グリッドの内容をテキストまたはJSONとして書き出すモジュール。
//! 各セルの値は[`CellValueNormalizer`]で表示文字列へ正規化されます。

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::DumpFormat;
use crate::error::XlsxMarkError;
use crate::grid::SheetGrid;
use crate::normalizer::CellValueNormalizer;
use crate::types::CellCoord;

/// JSONダンプのルートオブジェクト
#[derive(Debug, Serialize)]
struct SheetDump {
    /// シート名
    sheet_name: String,

    /// 正規化済みの行データ（列名 → 値）
    rows: Vec<Map<String, Value>>,
}

/// シートダンパー
///
/// グリッドを行優先で走査し、正規化済みのセル値を出力形式に応じた
/// 1つの文字列へまとめます。
///
/// # 出力形式
///
/// - [`DumpFormat::Text`]: 各行のセルを半角スペース1個で結合し、
///   各行を改行（`\n`）で終端します。空セルも位置を保持するため、
///   行末や連続した空セルはスペースとして現れます。
/// - [`DumpFormat::Json`]: シート全体を1つのJSONオブジェクトとして
///   出力します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxmark::{workbook, SheetDumper};
///
/// # fn main() -> Result<(), xlsxmark::XlsxMarkError> {
/// let book = workbook::load("input.xlsx")?;
/// let grid = workbook::read_grid(&book, "Sheet1")?;
///
/// let dumper = SheetDumper::new();
/// print!("{}", dumper.dump(&grid)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SheetDumper {
    /// 出力形式
    format: DumpFormat,

    /// セル値の正規化器
    normalizer: CellValueNormalizer,
}

impl SheetDumper {
    /// デフォルト設定（テキスト形式、ISO 8601日時）のダンパーを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 出力形式と正規化器を指定したダンパーを生成
    pub fn with_options(format: DumpFormat, normalizer: CellValueNormalizer) -> Self {
        Self { format, normalizer }
    }

    /// グリッドの各行を正規化済み文字列の列として返すイテレータ
    ///
    /// 遅延評価で、同じグリッドに対して何度でも呼び出せます。
    pub fn rows<'a>(
        &'a self,
        grid: &'a SheetGrid,
    ) -> impl Iterator<Item = Vec<String>> + 'a {
        grid.rows().map(move |row| {
            row.iter()
                .map(|cell| self.normalizer.normalize(&cell.value))
                .collect()
        })
    }

    /// グリッド全体を1つの文字列としてダンプ
    pub fn dump(&self, grid: &SheetGrid) -> Result<String, XlsxMarkError> {
        match self.format {
            DumpFormat::Text => Ok(self.dump_text(grid)),
            DumpFormat::Json => self.dump_json(grid),
        }
    }

    /// テキスト形式: 行内は半角スペース結合、行は改行終端
    fn dump_text(&self, grid: &SheetGrid) -> String {
        let mut output = String::new();
        for row in self.rows(grid) {
            output.push_str(&row.join(" "));
            output.push('\n');
        }
        output
    }

    /// JSON形式: 列名（A, B, C, ...）をキーとする行オブジェクトの列
    fn dump_json(&self, grid: &SheetGrid) -> Result<String, XlsxMarkError> {
        let rows = self
            .rows(grid)
            .map(|row| {
                row.into_iter()
                    .enumerate()
                    .map(|(col, value)| {
                        let key = CellCoord::col_index_to_letter(col as u32);
                        (key, Value::String(value))
                    })
                    .collect()
            })
            .collect();

        let dump = SheetDump {
            sheet_name: grid.name().to_string(),
            rows,
        };
        Ok(serde_json::to_string_pretty(&dump)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridCell;
    use crate::types::{CellStyle, CellValue};
    use std::sync::Arc;

    fn cell(value: CellValue) -> GridCell {
        GridCell::new(value, Arc::new(CellStyle::default()))
    }

    fn text(s: &str) -> GridCell {
        cell(CellValue::Text(s.to_string()))
    }

    fn sample_grid() -> SheetGrid {
        SheetGrid::new(
            "Sheet1",
            vec![
                vec![text("a"), text("b"), text("c")],
                vec![
                    cell(CellValue::Number(1.0)),
                    cell(CellValue::Number(2.0)),
                    cell(CellValue::Number(3.0)),
                ],
            ],
        )
    }

    #[test]
    fn test_dump_text_joins_rows_with_spaces() {
        let dumper = SheetDumper::new();
        assert_eq!(dumper.dump(&sample_grid()).unwrap(), "a b c\n1 2 3\n");
    }

    #[test]
    fn test_dump_text_preserves_empty_cell_positions() {
        let grid = SheetGrid::new(
            "Sheet1",
            vec![vec![text("a"), cell(CellValue::Empty), text("c")]],
        );
        let dumper = SheetDumper::new();
        // 空セルは空文字列として結合され、スペースが連続する
        assert_eq!(dumper.dump(&grid).unwrap(), "a  c\n");
    }

    #[test]
    fn test_dump_text_empty_grid() {
        let grid = SheetGrid::new("Empty", vec![]);
        let dumper = SheetDumper::new();
        assert_eq!(dumper.dump(&grid).unwrap(), "");
    }

    #[test]
    fn test_dump_text_single_cell_row_has_no_trailing_space() {
        let grid = SheetGrid::new("Sheet1", vec![vec![text("only")]]);
        let dumper = SheetDumper::new();
        assert_eq!(dumper.dump(&grid).unwrap(), "only\n");
    }

    #[test]
    fn test_rows_iterator_is_restartable() {
        let grid = sample_grid();
        let dumper = SheetDumper::new();

        let first: Vec<Vec<String>> = dumper.rows(&grid).collect();
        let second: Vec<Vec<String>> = dumper.rows(&grid).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], vec!["a", "b", "c"]);
        assert_eq!(first[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_dump_json_structure() {
        let dumper =
            SheetDumper::with_options(DumpFormat::Json, CellValueNormalizer::new());
        let output = dumper.dump(&sample_grid()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["sheet_name"], "Sheet1");
        assert_eq!(parsed["rows"][0]["A"], "a");
        assert_eq!(parsed["rows"][0]["C"], "c");
        assert_eq!(parsed["rows"][1]["B"], "2");
    }

    #[test]
    fn test_dump_json_empty_grid() {
        let grid = SheetGrid::new("Empty", vec![]);
        let dumper =
            SheetDumper::with_options(DumpFormat::Json, CellValueNormalizer::new());
        let parsed: serde_json::Value =
            serde_json::from_str(&dumper.dump(&grid).unwrap()).unwrap();
        assert_eq!(parsed["sheet_name"], "Empty");
        assert_eq!(parsed["rows"].as_array().unwrap().len(), 0);
    }
}
