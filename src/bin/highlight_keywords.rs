//! ワークブックの内容をダンプし、キーワード一致セルをハイライトする
//! コマンドラインツール。
//!
//! 処理内容:
//! 1. ワークブックを読み込み、対象シートをテキストダンプして標準出力へ
//! 2. キーワードに一致するセルを緑でハイライト
//! 3. 動作確認用にB5・C5へ値を書き込み
//! 4. 同じファイルへ書き戻し

use xlsxmark::{workbook, KeywordHighlighter, SheetDumper, XlsxMarkError};

/// 対象ファイル（読み込みと書き戻しで同一パス）
const FILE_PATH: &str = "sample.xlsx";

/// 対象シート名
const SHEET_NAME: &str = "シート1";

/// ハイライト対象のキーワード
const KEYWORDS: &[&str] = &["4"];

fn main() -> Result<(), XlsxMarkError> {
    let mut book = workbook::load(FILE_PATH)?;
    let mut grid = workbook::read_grid(&book, SHEET_NAME)?;

    // シート内容のダンプ
    let dumper = SheetDumper::new();
    print!("{}", dumper.dump(&grid)?);

    // キーワード一致セルのハイライト
    let highlighter =
        KeywordHighlighter::new(KEYWORDS.iter().map(|k| k.to_string()).collect());
    let marked = highlighter.mark(&mut grid);
    let ws = workbook::sheet_by_name_mut(&mut book, SHEET_NAME)?;
    highlighter.apply(ws, &marked);

    // 動作確認用のセル書き込み
    workbook::set_cell_value(&mut book, SHEET_NAME, "B5", "10")?;
    workbook::set_cell_value(&mut book, SHEET_NAME, "C5", "2")?;

    workbook::save(&book, FILE_PATH)?;
    println!("highlighted {} cells -> {}", marked.len(), FILE_PATH);

    Ok(())
}
