//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxmarkクレート全体で使用するエラー型
///
/// ワークブックの読み込み・保存と設定検証で発生するエラーを統一的に
/// 扱います。明示的な失敗条件は2つだけです: 指定された名前のワーク
/// シートが存在しない場合の`WorksheetNotFound`と、ファイルが読めない
/// 場合に外部ライブラリから伝播する`Workbook`/`Io`。どちらも致命的で、
/// 呼び出し側で回復は行いません。
///
/// セル値の正規化（[`crate::CellValueNormalizer`]）はエラーを発生させ
/// ません。データの欠落は常に空文字列に縮退します。
#[derive(Error, Debug)]
pub enum XlsxMarkError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの読み込み・保存中に発生したエラー
    ///
    /// 外部ライブラリ（umya-spreadsheet）がXLSXファイルの解析または
    /// 書き込みに失敗した場合に発生します。ファイルの不存在・破損・
    /// 非対応形式などが原因となります。
    #[error("Workbook error: {0}")]
    Workbook(#[from] umya_spreadsheet::XlsxError),

    /// 指定された名前のワークシートが存在しないエラー
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxmark::XlsxMarkError;
    ///
    /// let error = XlsxMarkError::WorksheetNotFound {
    ///     name: "シート1".to_string(),
    /// };
    /// println!("{}", error);
    /// // 出力: "Worksheet not found: 'シート1'"
    /// ```
    #[error("Worksheet not found: '{name}'")]
    WorksheetNotFound {
        /// 見つからなかったシート名
        name: String,
    },

    /// JSONダンプのシリアライズエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `MarkerBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、ハイライト色が16進ARGB文字列でない
    /// 場合や、カスタム日付形式が不正な場合などです。
    #[error("Configuration error: {0}")]
    Config(String),
}
