//! Workbook Module
//!
//! 外部ライブラリ（umya-spreadsheet）との橋渡しを行うモジュール。
//! ワークブックの読み込み・保存・シート検索と、外部ライブラリの
//! セル表現から本クレートの[`CellValue`]/[`CellStyle`]への変換を
//! 提供します。バイナリ形式の解析・書き込みはすべて外部ライブラリに
//! 委譲します。

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use umya_spreadsheet::{Cell, CellRawValue, Spreadsheet, Worksheet};

use crate::error::XlsxMarkError;
use crate::grid::{GridCell, SheetGrid};
use crate::types::{CellCoord, CellRange, CellStyle, CellValue, Color, Fill, MergedRegion, RichTextRun};

/// Excelのエラーコード一覧
///
/// 外部ライブラリはエラーセルの値を文字列として返すため、
/// 既知のエラーコードとの一致でエラー値を判別する。
const ERROR_CODES: &[&str] = &[
    "#DIV/0!",
    "#N/A",
    "#NAME?",
    "#NULL!",
    "#NUM!",
    "#REF!",
    "#VALUE!",
    "#SPILL!",
    "#CALC!",
    "#GETTING_DATA",
];

/// ワークブックをファイルから丸ごと読み込む
///
/// 読み込みは1回のファイル全体読み込みです。ファイルが存在しない・
/// 読めない場合は外部ライブラリのエラーがそのまま伝播します。
pub fn load<P: AsRef<Path>>(path: P) -> Result<Spreadsheet, XlsxMarkError> {
    Ok(umya_spreadsheet::reader::xlsx::read(path)?)
}

/// ワークブックをファイルへ丸ごと書き戻す
///
/// 同一パスへの書き戻しで read-modify-write サイクルが完成します。
/// 部分書き込みやアトミックリネームは行いません。
pub fn save<P: AsRef<Path>>(book: &Spreadsheet, path: P) -> Result<(), XlsxMarkError> {
    Ok(umya_spreadsheet::writer::xlsx::write(book, path)?)
}

/// 名前でワークシートを検索
///
/// # 発生し得るエラー
///
/// * `XlsxMarkError::WorksheetNotFound`: 指定された名前のシートが
///   存在しない場合
pub fn sheet_by_name<'a>(
    book: &'a Spreadsheet,
    name: &str,
) -> Result<&'a Worksheet, XlsxMarkError> {
    book.get_sheet_collection()
        .iter()
        .find(|ws| ws.get_name() == name)
        .ok_or_else(|| XlsxMarkError::WorksheetNotFound {
            name: name.to_string(),
        })
}

/// 名前でワークシートを検索（可変）
pub fn sheet_by_name_mut<'a>(
    book: &'a mut Spreadsheet,
    name: &str,
) -> Result<&'a mut Worksheet, XlsxMarkError> {
    book.get_sheet_collection_mut()
        .iter_mut()
        .find(|ws| ws.get_name() == name)
        .ok_or_else(|| XlsxMarkError::WorksheetNotFound {
            name: name.to_string(),
        })
}

/// 指定セルに値を書き込む
///
/// # 引数
///
/// * `book` - ワークブック
/// * `sheet_name` - シート名
/// * `a1` - セル座標（A1記法、例: "B5"）
/// * `value` - 書き込む値
pub fn set_cell_value(
    book: &mut Spreadsheet,
    sheet_name: &str,
    a1: &str,
    value: &str,
) -> Result<(), XlsxMarkError> {
    let ws = sheet_by_name_mut(book, sheet_name)?;
    ws.get_cell_mut(a1).set_value(value);
    Ok(())
}

/// ワークシートをインメモリグリッドへ変換
///
/// 行優先・列優先の順でセルを走査し、各セルを[`CellValue`]に変換
/// します。同じ書式のセル同士は1つの[`CellStyle`]レコードを`Arc`で
/// 共有します（元ファイルのスタイル共有の再現）。
pub fn read_grid(book: &Spreadsheet, sheet_name: &str) -> Result<SheetGrid, XlsxMarkError> {
    let ws = sheet_by_name(book, sheet_name)?;

    let merged: Vec<MergedRegion> = ws
        .get_merge_cells()
        .iter()
        .filter_map(|range| CellRange::parse(&range.get_range()))
        .map(MergedRegion::new)
        .collect();

    // 同値のスタイルを1レコードに集約する
    let mut interned: HashMap<CellStyle, Arc<CellStyle>> = HashMap::new();
    let mut intern = |style: CellStyle| -> Arc<CellStyle> {
        interned
            .entry(style.clone())
            .or_insert_with(|| Arc::new(style))
            .clone()
    };

    let (max_col, max_row) = ws.get_highest_column_and_row();

    let mut rows = Vec::with_capacity(max_row as usize);
    for row in 1..=max_row {
        let mut cells = Vec::with_capacity(max_col as usize);
        for col in 1..=max_col {
            let coord = CellCoord::new(row - 1, col - 1);
            let cell = match ws.get_cell((col, row)) {
                Some(cell) => {
                    let value = convert_cell(cell, coord, &merged);
                    let style = intern(convert_style(cell.get_style()));
                    GridCell::new(value, style)
                }
                None => {
                    let value = if merged.iter().any(|m| m.is_shadowed(coord)) {
                        merged_reference(coord, &merged)
                    } else {
                        CellValue::Empty
                    };
                    GridCell::new(value, intern(CellStyle::default()))
                }
            };
            cells.push(cell);
        }
        rows.push(cells);
    }

    Ok(SheetGrid::new(sheet_name, rows))
}

/// 外部ライブラリのセルを`CellValue`に変換
///
/// 判定順序は正規化の解決順序に合わせる: 結合セル → 数式 → 生の値。
fn convert_cell(cell: &Cell, coord: CellCoord, merged: &[MergedRegion]) -> CellValue {
    // 1. 結合セルの親以外は値を持たない
    if merged.iter().any(|m| m.is_shadowed(coord)) {
        return merged_reference(coord, merged);
    }

    // 2. 数式セル: 生の値はキャッシュされた計算結果
    let formula = cell.get_formula();
    if !formula.is_empty() {
        let cached = match raw_value(cell) {
            CellValue::Empty => None,
            result => Some(Box::new(result)),
        };
        return CellValue::Formula { cached };
    }

    // 3. 生の値
    raw_value(cell)
}

fn merged_reference(coord: CellCoord, merged: &[MergedRegion]) -> CellValue {
    let owner = merged
        .iter()
        .find(|m| m.contains(coord))
        .map(|m| m.parent)
        .unwrap_or(coord);
    CellValue::MergedReference { owner }
}

/// セルの生の値を`CellValue`に変換
fn raw_value(cell: &Cell) -> CellValue {
    match cell.get_raw_value() {
        CellRawValue::Numeric(n) => {
            // 日付書式が付いた数値はシリアル日付として扱う
            let format_code = cell
                .get_style()
                .get_number_format()
                .map(|nf| nf.get_format_code().to_string());
            match format_code {
                Some(code) if is_date_format_code(&code) => match serial_to_datetime(*n) {
                    Some(dt) => CellValue::DateTime(dt),
                    None => CellValue::Number(*n),
                },
                _ => CellValue::Number(*n),
            }
        }

        CellRawValue::Bool(b) => CellValue::Boolean(*b),

        CellRawValue::RichText(rich_text) => CellValue::RichText(
            rich_text
                .get_rich_text_elements()
                .iter()
                .map(|element| RichTextRun::new(element.get_text().to_string()))
                .collect(),
        ),

        CellRawValue::Empty => CellValue::Empty,

        // 文字列およびその他の値は表示文字列経由で変換する
        _ => {
            let s = cell.get_value().to_string();
            if s.is_empty() {
                CellValue::Empty
            } else if is_error_code(&s) {
                CellValue::ErrorValue { code: s }
            } else {
                CellValue::Text(s)
            }
        }
    }
}

/// 外部ライブラリのスタイルから不変スタイル値を抽出
fn convert_style(style: &umya_spreadsheet::Style) -> CellStyle {
    let number_format = style
        .get_number_format()
        .map(|nf| nf.get_format_code().to_string())
        .filter(|code| !code.is_empty() && code.as_str() != "General");

    let fill = extract_solid_fill(style);

    CellStyle {
        fill,
        number_format,
    }
}

/// スタイルから塗りつぶし色を抽出
fn extract_solid_fill(style: &umya_spreadsheet::Style) -> Option<Fill> {
    let fill = style.get_fill()?;
    let pattern = fill.get_pattern_fill()?;
    let color = pattern.get_foreground_color()?;
    let argb = color.get_argb();
    if argb.is_empty() {
        return None;
    }
    Some(Fill::Solid(Color::from_argb(argb.to_string())))
}

/// 文字列が既知のExcelエラーコードかどうかを判定
fn is_error_code(s: &str) -> bool {
    ERROR_CODES.contains(&s)
}

/// 数値書式コードが日付・時刻書式かどうかを判定（ヒューリスティック）
fn is_date_format_code(code: &str) -> bool {
    let lower = code.to_lowercase();
    lower.contains("yy") || lower.contains("mm") || lower.contains("dd") || lower.contains("hh")
}

/// Excelのシリアル日付値を日時に変換
///
/// 1900年システム（1899年12月30日起算）。シリアル値の小数部は
/// 1日を86400秒とした時刻を表す。
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let days = serial.floor() as i64;
    let seconds = ((serial - serial.floor()) * 86_400.0).round() as i64;

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch
        .checked_add_signed(Duration::days(days))?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(seconds))
}

// ワークブックの読み込み・変換そのものは実際のXLSXファイルが必要な
// ため、統合テスト（tests/）で検証します。ここでは純粋な変換関数の
// 単体テストのみを行います。
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_error_code() {
        assert!(is_error_code("#DIV/0!"));
        assert!(is_error_code("#REF!"));
        assert!(is_error_code("#N/A"));
        assert!(!is_error_code("#hashtag"));
        assert!(!is_error_code("DIV/0"));
        assert!(!is_error_code(""));
    }

    #[test]
    fn test_is_date_format_code() {
        assert!(is_date_format_code("yyyy-mm-dd"));
        assert!(is_date_format_code("m/d/yy"));
        assert!(is_date_format_code("hh:mm:ss"));
        assert!(is_date_format_code("MM/DD/YY"));
        // 数値書式は日付ではない
        assert!(!is_date_format_code("#,##0"));
        assert!(!is_date_format_code("0.00"));
        assert!(!is_date_format_code("General"));
    }

    #[test]
    fn test_serial_to_datetime_date_part() {
        // 2025-01-01 はシリアル値 45658
        let dt = serial_to_datetime(45658.0).unwrap();
        assert_eq!(dt.format("%Y-%m-%dT%H:%M:%S").to_string(), "2025-01-01T00:00:00");
    }

    #[test]
    fn test_serial_to_datetime_time_part() {
        // 小数部 0.5 は正午
        let dt = serial_to_datetime(45658.5).unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "12:00:00");

        // 0.25 は 06:00
        let dt = serial_to_datetime(45658.25).unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "06:00:00");
    }

    #[test]
    fn test_serial_to_datetime_rejects_non_finite() {
        assert!(serial_to_datetime(f64::NAN).is_none());
        assert!(serial_to_datetime(f64::INFINITY).is_none());
    }
}
