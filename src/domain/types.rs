// ==========================================
// Sheet Seed - 领域类型定义
// ==========================================
// 职责: 单元格地址 / 边距 / 工作表可见性
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工作表可见性 (Sheet Visibility)
// ==========================================
// Hidden / VeryHidden 的工作表永远不参与导入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SheetVisibility {
    Visible,    // 可见
    Hidden,     // 隐藏
    VeryHidden, // 深度隐藏（仅 VBA 可见）
}

impl SheetVisibility {
    pub fn is_visible(self) -> bool {
        matches!(self, SheetVisibility::Visible)
    }
}

impl fmt::Display for SheetVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetVisibility::Visible => write!(f, "VISIBLE"),
            SheetVisibility::Hidden => write!(f, "HIDDEN"),
            SheetVisibility::VeryHidden => write!(f, "VERY_HIDDEN"),
        }
    }
}

// ==========================================
// 边距 (Margin)
// ==========================================
// 表头与数据列的统一偏移量（0 基）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub left: u32,
    pub top: u32,
}

impl Margin {
    pub fn new(left: u32, top: u32) -> Self {
        Self { left, top }
    }
}

// ==========================================
// 单元格地址 (Cell Address)
// ==========================================
// 格式: Sheet1!B4 / 'My Sheet'!B4
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub sheet: String,
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub fn new(sheet: impl Into<String>, row: u32, col: u32) -> Self {
        Self {
            sheet: sheet.into(),
            row,
            col,
        }
    }

    /// 不带工作表名的 A1 引用（如 "B4"）
    pub fn a1(&self) -> String {
        format!("{}{}", column_letters(self.col), self.row as u64 + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_quoting(&self.sheet) {
            write!(f, "'{}'!{}", self.sheet.replace('\'', "''"), self.a1())
        } else {
            write!(f, "{}!{}", self.sheet, self.a1())
        }
    }
}

/// 0 基列号 → 列字母（0 → A, 25 → Z, 26 → AA）
pub fn column_letters(col: u32) -> String {
    let mut n = col as u64 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

// 工作表名含空白或符号时需加单引号
fn needs_quoting(sheet: &str) -> bool {
    sheet.is_empty()
        || sheet
            .chars()
            .any(|c| !(c.is_alphanumeric() || c == '_' || c == '.'))
        || sheet.chars().next().is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(1), "B");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn test_cell_address_display() {
        assert_eq!(CellAddress::new("table_2", 3, 1).to_string(), "table_2!B4");
        assert_eq!(CellAddress::new("Sheet1", 0, 0).to_string(), "Sheet1!A1");
    }

    #[test]
    fn test_cell_address_quotes_special_sheet_names() {
        assert_eq!(CellAddress::new("My Sheet", 0, 2).to_string(), "'My Sheet'!C1");
        assert_eq!(CellAddress::new("it's", 1, 0).to_string(), "'it''s'!A2");
    }

    #[test]
    fn test_visibility() {
        assert!(SheetVisibility::Visible.is_visible());
        assert!(!SheetVisibility::Hidden.is_visible());
        assert!(!SheetVisibility::VeryHidden.is_visible());
    }
}
