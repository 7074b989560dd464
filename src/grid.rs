//! Grid Module
//!
//! 1シート分のセルを行優先で保持するインメモリグリッド。
//! 外部ライブラリのワークシートから構築され、ダンプとハイライトの
//! 両方がこの構造を走査します。

use std::sync::Arc;

use crate::types::{CellCoord, CellStyle, CellValue};

/// グリッド上の1セル
#[derive(Debug, Clone)]
pub struct GridCell {
    /// セルの値
    pub value: CellValue,

    /// セルのスタイルレコード
    ///
    /// 元ファイル内で同じ書式を使うセル同士は同一の`Arc`を共有する。
    /// スタイルを変更する場合はレコードを複製して再束縛すること
    /// （[`CellStyle::with_fill`]）。共有インスタンスの書き換えは不可。
    pub style: Arc<CellStyle>,
}

impl GridCell {
    /// 新しいセルを生成
    pub fn new(value: CellValue, style: Arc<CellStyle>) -> Self {
        Self { value, style }
    }

    /// デフォルトスタイルの空セルを生成
    pub fn empty() -> Self {
        Self {
            value: CellValue::Empty,
            style: Arc::new(CellStyle::default()),
        }
    }
}

/// 1シート分の論理グリッド（行 × 列、0始まり）
#[derive(Debug, Clone)]
pub struct SheetGrid {
    /// シート名
    name: String,

    /// グリッドデータ（行優先）
    cells: Vec<Vec<GridCell>>,
}

impl SheetGrid {
    /// 行データからグリッドを構築
    pub fn new(name: impl Into<String>, cells: Vec<Vec<GridCell>>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// シート名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// 列数を取得（最長行の長さ）
    pub fn col_count(&self) -> usize {
        self.cells.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    /// 行を順に返すイテレータ（行優先走査）
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.iter().map(|row| row.as_slice())
    }

    /// 指定座標のセルを取得
    pub fn cell(&self, coord: CellCoord) -> Option<&GridCell> {
        self.cells
            .get(coord.row as usize)
            .and_then(|row| row.get(coord.col as usize))
    }

    /// 指定座標のセルを可変で取得
    pub fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut GridCell> {
        self.cells
            .get_mut(coord.row as usize)
            .and_then(|row| row.get_mut(coord.col as usize))
    }

    /// 全セルを座標付きで可変走査（行優先、次に列優先）
    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = (CellCoord, &mut GridCell)> {
        self.cells.iter_mut().enumerate().flat_map(|(row, cells)| {
            cells.iter_mut().enumerate().map(move |(col, cell)| {
                (CellCoord::new(row as u32, col as u32), cell)
            })
        })
    }
}
