//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! セル値のタグ付き共用体（`CellValue`）と、セルスタイルの不変値型
//! （`CellStyle`）がこのクレートのデータモデルの中心です。

use std::sync::Arc;

use chrono::NaiveDateTime;

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1"）
    pub fn to_a1_notation(&self) -> String {
        let col_str = Self::col_index_to_letter(self.col);
        format!("{}{}", col_str, self.row + 1)
    }

    /// A1形式の文字列を座標に変換（例: "B5" -> (4, 1)）
    ///
    /// 外部ライブラリが返すセル結合範囲の文字列（例: "A1:C3"）を
    /// 解析するために使用します。形式が不正な場合は`None`を返します。
    pub fn parse_a1(s: &str) -> Option<Self> {
        let s = s.trim();
        let split = s.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() || digits.is_empty() {
            return None;
        }

        let mut col: u32 = 0;
        for ch in letters.chars() {
            if !ch.is_ascii_alphabetic() {
                return None;
            }
            let v = (ch.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
            col = col.checked_mul(26)?.checked_add(v)?;
        }

        let row: u32 = digits.parse().ok()?;
        if row == 0 || col == 0 {
            return None;
        }

        Some(Self::new(row - 1, col - 1))
    }

    /// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
    pub(crate) fn col_index_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            let remainder = col % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }
}

/// セル範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellCoord,
    pub end: CellCoord,
}

impl CellRange {
    /// 新しい範囲を生成
    pub fn new(start: CellCoord, end: CellCoord) -> Self {
        Self { start, end }
    }

    /// "A1:C3"形式の範囲文字列を解析
    ///
    /// 単一セル形式（"A1"）も1×1の範囲として受け付けます。
    pub fn parse(s: &str) -> Option<Self> {
        match s.split_once(':') {
            Some((start, end)) => {
                let start = CellCoord::parse_a1(start)?;
                let end = CellCoord::parse_a1(end)?;
                Some(Self::new(start, end))
            }
            None => {
                let coord = CellCoord::parse_a1(s)?;
                Some(Self::new(coord, coord))
            }
        }
    }

    /// 指定された座標が範囲内にあるかを判定
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row >= self.start.row
            && coord.row <= self.end.row
            && coord.col >= self.start.col
            && coord.col <= self.end.col
    }
}

/// セル結合範囲の情報
///
/// 結合範囲の値は親セル（左上セル）だけが保持します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRegion {
    /// 結合範囲
    pub range: CellRange,

    /// 親セル（左上セル）の座標
    pub parent: CellCoord,
}

impl MergedRegion {
    /// 新しい結合範囲を生成
    pub fn new(range: CellRange) -> Self {
        Self {
            parent: range.start,
            range,
        }
    }

    /// 指定された座標が結合範囲内にあるかを判定
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.range.contains(coord)
    }

    /// 指定された座標が親セル以外の結合セルかを判定
    pub fn is_shadowed(&self, coord: CellCoord) -> bool {
        self.contains(coord) && coord != self.parent
    }
}

/// リッチテキストの1ラン（書式の揃った連続テキスト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichTextRun {
    /// テキスト内容
    pub text: String,
}

impl RichTextRun {
    /// 新しいランを生成
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// セルの値を表すタグ付き共用体
///
/// 外部ライブラリから読み取った1セルの生の値を、明示的な列挙型として
/// 表現します。正規化（[`crate::CellValueNormalizer`]）はこの型に対する
/// 網羅的なmatchで行い、逐次的な型判定は行いません。
///
/// `#[non_exhaustive]`のため、クレート外でmatchする場合はワイルドカード
/// アームが必須です。未知の値は常に空文字列として扱ってください。
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CellValue {
    /// 空セル
    Empty,

    /// 数値（f64）
    Number(f64),

    /// 文字列
    Text(String),

    /// 論理値
    Boolean(bool),

    /// 日時（シリアル値から変換済み）
    DateTime(NaiveDateTime),

    /// ハイパーリンク（正規化は表示テキストを返す。URLではない）
    Hyperlink {
        /// 表示テキスト
        display: String,
    },

    /// 数式セル（キャッシュされた計算結果を保持）
    Formula {
        /// キャッシュされた計算結果。存在しない場合は`None`
        cached: Option<Box<CellValue>>,
    },

    /// 共有数式セル（他セルの計算パターンを再利用する数式）
    SharedFormula {
        /// キャッシュされた計算結果
        cached: Option<Box<CellValue>>,
    },

    /// 配列数式の結果セル
    ArrayFormulaResult {
        /// キャッシュされた計算結果
        cached: Option<Box<CellValue>>,
    },

    /// リッチテキスト（ラン順の列）
    RichText(Vec<RichTextRun>),

    /// エラー値（例: #DIV/0!）
    ErrorValue {
        /// エラーコード文字列
        code: String,
    },

    /// 結合セルの親以外のセル
    ///
    /// 不変条件: このセルは独立した値を持たない。値が必要な場合は
    /// `owner`（親セル）を参照すること。正規化は常に空文字列を返す。
    MergedReference {
        /// 親セルの座標
        owner: CellCoord,
    },
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// ARGB形式の色
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    /// ARGB16進文字列から色を生成（例: "FF00FF00"）
    ///
    /// 6桁のRGB文字列はアルファ"FF"を補って8桁に正規化します。
    pub fn from_argb(argb: impl Into<String>) -> Self {
        let argb: String = argb.into();
        let argb = argb.to_ascii_uppercase();
        if argb.len() == 6 {
            Self(format!("FF{}", argb))
        } else {
            Self(argb)
        }
    }

    /// ARGB16進文字列を取得
    pub fn as_argb(&self) -> &str {
        &self.0
    }
}

/// セルの塗りつぶし（背景）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fill {
    /// 単色塗りつぶし
    Solid(Color),
}

/// セルスタイルの不変値型
///
/// 元ファイル内で同じ書式を使うセル同士は、読み込み時に1つの
/// スタイルレコードを`Arc`で共有します（[`crate::grid::GridCell`]）。
/// 共有インスタンスをその場で書き換えると、同じレコードを参照する
/// すべてのセルの見た目が変わってしまうため、「変更」は必ず
/// 構造的コピー（[`CellStyle::with_fill`]）を作って対象セルにだけ
/// 再束縛すること。この型は内部可変性を持たないため、`Arc`越しの
/// その場書き換えは型レベルで不可能です。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    /// 塗りつぶし
    pub fill: Option<Fill>,

    /// 数値書式コード（例: "m/d/yy"。"General"の場合は`None`）
    pub number_format: Option<String>,
}

impl CellStyle {
    /// 塗りつぶしだけを上書きした新しいスタイル値を生成
    pub fn with_fill(&self, fill: Fill) -> Self {
        Self {
            fill: Some(fill),
            ..self.clone()
        }
    }

    /// 共有可能なスタイルレコードとして包む
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // CellCoord のテスト
    #[test]
    fn test_cell_coord_to_a1_notation() {
        assert_eq!(CellCoord::new(0, 0).to_a1_notation(), "A1");
        assert_eq!(CellCoord::new(0, 25).to_a1_notation(), "Z1");
        assert_eq!(CellCoord::new(0, 26).to_a1_notation(), "AA1");
        assert_eq!(CellCoord::new(99, 701).to_a1_notation(), "ZZ100");
        assert_eq!(CellCoord::new(0, 51).to_a1_notation(), "AZ1");
        assert_eq!(CellCoord::new(0, 52).to_a1_notation(), "BA1");
    }

    #[test]
    fn test_cell_coord_parse_a1() {
        assert_eq!(CellCoord::parse_a1("A1"), Some(CellCoord::new(0, 0)));
        assert_eq!(CellCoord::parse_a1("B5"), Some(CellCoord::new(4, 1)));
        assert_eq!(CellCoord::parse_a1("Z1"), Some(CellCoord::new(0, 25)));
        assert_eq!(CellCoord::parse_a1("AA1"), Some(CellCoord::new(0, 26)));
        assert_eq!(CellCoord::parse_a1("ZZ100"), Some(CellCoord::new(99, 701)));
        // 小文字も許容
        assert_eq!(CellCoord::parse_a1("b5"), Some(CellCoord::new(4, 1)));
    }

    #[test]
    fn test_cell_coord_parse_a1_invalid() {
        assert_eq!(CellCoord::parse_a1(""), None);
        assert_eq!(CellCoord::parse_a1("123"), None);
        assert_eq!(CellCoord::parse_a1("ABC"), None);
        assert_eq!(CellCoord::parse_a1("A0"), None);
        assert_eq!(CellCoord::parse_a1("1A"), None);
    }

    // CellRange のテスト
    #[test]
    fn test_cell_range_parse() {
        let range = CellRange::parse("A1:C3").unwrap();
        assert_eq!(range.start, CellCoord::new(0, 0));
        assert_eq!(range.end, CellCoord::new(2, 2));

        // 単一セル形式
        let single = CellRange::parse("B2").unwrap();
        assert_eq!(single.start, CellCoord::new(1, 1));
        assert_eq!(single.end, CellCoord::new(1, 1));

        assert_eq!(CellRange::parse("A1:"), None);
        assert_eq!(CellRange::parse(":C3"), None);
    }

    #[test]
    fn test_cell_range_contains() {
        let range = CellRange::parse("A1:F11").unwrap();

        assert!(range.contains(CellCoord::new(0, 0)));
        assert!(range.contains(CellCoord::new(5, 3)));
        assert!(range.contains(CellCoord::new(10, 5)));

        assert!(!range.contains(CellCoord::new(11, 5)));
        assert!(!range.contains(CellCoord::new(5, 6)));
    }

    // MergedRegion のテスト
    #[test]
    fn test_merged_region_parent_is_top_left() {
        let merged = MergedRegion::new(CellRange::parse("B2:D4").unwrap());
        assert_eq!(merged.parent, CellCoord::new(1, 1));
    }

    #[test]
    fn test_merged_region_is_shadowed() {
        let merged = MergedRegion::new(CellRange::parse("A1:C1").unwrap());

        // 親セルは影にならない
        assert!(!merged.is_shadowed(CellCoord::new(0, 0)));
        // 親以外の結合セルは影になる
        assert!(merged.is_shadowed(CellCoord::new(0, 1)));
        assert!(merged.is_shadowed(CellCoord::new(0, 2)));
        // 範囲外
        assert!(!merged.is_shadowed(CellCoord::new(1, 0)));
    }

    // Color のテスト
    #[test]
    fn test_color_from_argb_normalizes_rgb() {
        assert_eq!(Color::from_argb("00FF00").as_argb(), "FF00FF00");
        assert_eq!(Color::from_argb("FF00FF00").as_argb(), "FF00FF00");
        assert_eq!(Color::from_argb("ff00ff00").as_argb(), "FF00FF00");
    }

    // CellStyle のテスト
    #[test]
    fn test_cell_style_with_fill_is_structural_copy() {
        let base = CellStyle {
            fill: None,
            number_format: Some("m/d/yy".to_string()),
        };
        let highlighted = base.with_fill(Fill::Solid(Color::from_argb("00FF00")));

        // 元のスタイルは変化しない
        assert_eq!(base.fill, None);
        // コピーは塗りつぶし以外のフィールドを引き継ぐ
        assert_eq!(
            highlighted.fill,
            Some(Fill::Solid(Color::from_argb("FF00FF00")))
        );
        assert_eq!(highlighted.number_format, Some("m/d/yy".to_string()));
    }

    #[test]
    fn test_cell_style_shared_rebinding_leaves_alias_intact() {
        let shared = CellStyle::default().shared();
        let mut cell_a = Arc::clone(&shared);
        let cell_b = Arc::clone(&shared);

        // セルAだけに新しいスタイル値を再束縛
        cell_a = cell_a
            .with_fill(Fill::Solid(Color::from_argb("00FF00")))
            .shared();

        assert!(cell_a.fill.is_some());
        assert!(cell_b.fill.is_none());
        assert!(Arc::ptr_eq(&cell_b, &shared));
    }

    // プロパティベーステスト
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// A1記法の往復変換: to_a1_notation -> parse_a1 は恒等写像
            #[test]
            fn test_a1_notation_round_trip(row in 0u32..100_000, col in 0u32..16_384) {
                let coord = CellCoord::new(row, col);
                let a1 = coord.to_a1_notation();
                prop_assert_eq!(CellCoord::parse_a1(&a1), Some(coord));
            }
        }
    }
}
