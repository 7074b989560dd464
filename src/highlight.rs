//! Highlight Module
//!
//! キーワードに一致するセルの塗りつぶしハイライトを提供するモジュール。
//! グリッド上での一致判定・スタイル再束縛（mark）と、ワークシートへの
//! 書き戻し（apply）の2段階で構成されます。

use umya_spreadsheet::Worksheet;

use crate::grid::SheetGrid;
use crate::normalizer::CellValueNormalizer;
use crate::types::{CellCoord, CellStyle, Color, Fill};

/// デフォルトのハイライト色（緑）
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "00FF00";

/// キーワードハイライター
///
/// セルの正規化済み表示文字列がキーワードのいずれかと完全一致する
/// セルに、単色塗りつぶしを設定します。部分一致・前後空白の無視は
/// 行いません。
///
/// # スタイル共有への対処
///
/// グリッド上では複数のセルが同一の[`CellStyle`]レコードを`Arc`で
/// 共有しています。共有レコードをその場で書き換えると、一致していない
/// セルの書式まで変わってしまいます。そのため一致したセルについては
/// 必ずレコードを複製してから塗りつぶしを設定し、そのセルの参照だけを
/// 新しいレコードへ再束縛します（[`CellStyle::with_fill`]）。
///
/// # 使用例
///
/// ```rust
/// use xlsxmark::{KeywordHighlighter, SheetGrid};
///
/// let mut grid = SheetGrid::new("Sheet1", vec![]);
/// let highlighter = KeywordHighlighter::new(vec!["4".to_string()]);
/// let marked = highlighter.mark(&mut grid);
/// assert!(marked.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct KeywordHighlighter {
    /// 一致判定するキーワード
    keywords: Vec<String>,

    /// 一致セルに設定する塗りつぶし
    fill: Fill,

    /// セル値の正規化器
    normalizer: CellValueNormalizer,
}

impl KeywordHighlighter {
    /// デフォルト色（緑）のハイライターを生成
    pub fn new(keywords: Vec<String>) -> Self {
        Self::with_options(
            keywords,
            Fill::Solid(Color::from_argb(DEFAULT_HIGHLIGHT_COLOR)),
            CellValueNormalizer::new(),
        )
    }

    /// 塗りつぶしと正規化器を指定したハイライターを生成
    pub fn with_options(
        keywords: Vec<String>,
        fill: Fill,
        normalizer: CellValueNormalizer,
    ) -> Self {
        Self {
            keywords,
            fill,
            normalizer,
        }
    }

    /// グリッド上の一致セルにハイライトを設定
    ///
    /// 行優先・列優先の順で全セルを走査し、一致したセルの座標を
    /// 走査順で返します。一致しなかったセルのスタイル参照には一切
    /// 触れません。
    pub fn mark(&self, grid: &mut SheetGrid) -> Vec<CellCoord> {
        let mut marked = Vec::new();

        for (coord, cell) in grid.cells_mut() {
            let display = self.normalizer.normalize(&cell.value);
            if !self.matches(&display) {
                continue;
            }

            // 共有レコードを書き換えず、複製して再束縛する
            cell.style = cell.style.with_fill(self.fill.clone()).shared();
            marked.push(coord);
        }

        marked
    }

    /// ワークシート上の指定セルへ塗りつぶしを書き戻す
    ///
    /// [`mark`](Self::mark)が返した座標列をそのまま渡します。外部
    /// ライブラリのスタイルも複製してからセルへ設定し直すため、
    /// ワークシート側のスタイル共有にも影響しません。
    pub fn apply(&self, ws: &mut Worksheet, marked: &[CellCoord]) {
        let Fill::Solid(color) = &self.fill;
        for coord in marked {
            let cell = ws.get_cell_mut(coord.to_a1_notation().as_str());
            let mut style = cell.get_style().clone();
            style.set_background_color(color.as_argb());
            cell.set_style(style);
        }
    }

    fn matches(&self, display: &str) -> bool {
        self.keywords.iter().any(|keyword| keyword == display)
    }
}
