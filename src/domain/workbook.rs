// ==========================================
// Sheet Seed - 工作簿快照
// ==========================================
// 只读快照: 打开一次，整个转换过程中不再变化
// 稀疏存储: 不存在的行/单元格为"缺失"，而不是空
// ==========================================

use crate::domain::cell::Cell;
use crate::domain::types::SheetVisibility;
use std::collections::{BTreeMap, HashMap};

// ==========================================
// Workbook
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) -> &mut Self {
        self.sheets.push(sheet);
        self
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// 按工作簿自然顺序排列的工作表
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

// ==========================================
// Sheet
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    visibility: SheetVisibility,
    rows: BTreeMap<u32, Row>,
    // 公式单元格的缓存计算结果
    cached_results: HashMap<(u32, u32), Cell>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: SheetVisibility::Visible,
            rows: BTreeMap::new(),
            cached_results: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> SheetVisibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: SheetVisibility) {
        self.visibility = visibility;
    }

    pub fn with_visibility(mut self, visibility: SheetVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// 写入单元格；行不存在时自动创建
    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        self.rows
            .entry(row)
            .or_insert_with(|| Row::new(row))
            .cells
            .insert(col, cell);
    }

    pub fn with_cell(mut self, row: u32, col: u32, cell: Cell) -> Self {
        self.set_cell(row, col, cell);
        self
    }

    /// 从 (row, col) 开始横向写入一行单元格
    pub fn with_row<I>(mut self, row: u32, col: u32, cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        for (offset, cell) in cells.into_iter().enumerate() {
            self.set_cell(row, col + offset as u32, cell);
        }
        self
    }

    /// 记录公式单元格的缓存结果
    pub fn set_cached_result(&mut self, row: u32, col: u32, cell: Cell) {
        self.cached_results.insert((row, col), cell);
    }

    pub fn cached_result(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cached_results.get(&(row, col))
    }

    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.get(&index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ==========================================
// Row
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    index: u32,
    cells: BTreeMap<u32, Cell>,
}

impl Row {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: BTreeMap::new(),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn cell(&self, col: u32) -> Option<&Cell> {
        self.cells.get(&col)
    }

    /// 最后一个存在单元格的列号 + 1；空行为 0
    pub fn last_cell_num(&self) -> u32 {
        self.cells
            .keys()
            .next_back()
            .map_or(0, |col| col.saturating_add(1))
    }

    pub fn cells(&self) -> impl Iterator<Item = (u32, &Cell)> {
        self.cells.iter().map(|(col, cell)| (*col, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_rows() {
        let sheet = Sheet::new("s")
            .with_cell(0, 0, Cell::text("a"))
            .with_cell(2, 3, Cell::number(1.0));

        assert!(sheet.row(0).is_some());
        assert!(sheet.row(1).is_none());
        assert_eq!(sheet.row(2).map(Row::last_cell_num), Some(4));
        assert!(sheet.row(2).and_then(|r| r.cell(0)).is_none());
        assert_eq!(sheet.row_count(), 2);
    }

    #[test]
    fn test_with_row_offsets_columns() {
        let sheet = Sheet::new("s").with_row(1, 2, vec![Cell::text("a"), Cell::text("b")]);
        let row = sheet.row(1).unwrap();
        assert_eq!(row.cell(2), Some(&Cell::text("a")));
        assert_eq!(row.cell(3), Some(&Cell::text("b")));
        assert_eq!(row.last_cell_num(), 4);
    }

    #[test]
    fn test_workbook_order() {
        let wb = Workbook::new()
            .with_sheet(Sheet::new("b"))
            .with_sheet(Sheet::new("a"));
        let names: Vec<&str> = wb.sheets().iter().map(Sheet::name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(wb.sheet_by_name("a").is_some());
        assert_eq!(wb.len(), 2);
    }
}
