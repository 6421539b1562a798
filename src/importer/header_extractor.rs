// ==========================================
// Sheet Seed - 表头提取
// ==========================================
// 两步:
// 1. locate_header: 表头行 = margin.top；不存在 → HeaderRowNotFound
//    宽度 = 最后单元格列号 + 1 - margin.left；≤ 0 → HeaderRowNotFound
// 2. header_columns: 每个表头单元格必须存在、非空、且为字符串
//    （数值/布尔不做字符串化，直接拒绝）
// 两步之间由调用方解析表名
// 重名列原样保留
// ==========================================

use crate::domain::cell::Value;
use crate::domain::types::{CellAddress, Margin};
use crate::domain::workbook::{Row, Sheet};
use crate::importer::cell_coercer::CellCoercer;
use crate::importer::error::{SeedError, SeedResult};

/// 已定位的表头行
#[derive(Debug, Clone, Copy)]
pub struct HeaderRow<'s> {
    row: &'s Row,
    width: usize,
}

impl<'s> HeaderRow<'s> {
    pub fn row(&self) -> &'s Row {
        self.row
    }

    /// 表头列数（≥ 1）
    pub fn width(&self) -> usize {
        self.width
    }
}

/// 定位表头行并计算宽度，不检查单元格内容
pub fn locate_header(sheet: &Sheet, margin: Margin) -> SeedResult<HeaderRow<'_>> {
    let header_not_found = || SeedError::HeaderRowNotFound {
        sheet: sheet.name().to_string(),
        row: margin.top,
    };

    let row = sheet.row(margin.top).ok_or_else(header_not_found)?;
    let width = i64::from(row.last_cell_num()) - i64::from(margin.left);
    if width <= 0 {
        return Err(header_not_found());
    }

    Ok(HeaderRow {
        row,
        width: width as usize,
    })
}

/// 校验表头单元格，返回按列顺序排列的列名
pub fn header_columns(
    sheet: &Sheet,
    header: &HeaderRow<'_>,
    margin: Margin,
    coercer: &CellCoercer<'_>,
) -> SeedResult<Vec<String>> {
    let mut columns = Vec::with_capacity(header.width);
    for col in margin.left..header.row.last_cell_num() {
        let address = || CellAddress::new(sheet.name(), margin.top, col);
        let cell = header
            .row
            .cell(col)
            .ok_or_else(|| SeedError::HeaderCellBlank { address: address() })?;

        match coercer.coerce(sheet, margin.top, col, cell)? {
            Value::Null => return Err(SeedError::HeaderCellBlank { address: address() }),
            Value::Text(name) if name.is_empty() => {
                return Err(SeedError::HeaderCellBlank { address: address() })
            }
            Value::Text(name) => columns.push(name),
            _ => return Err(SeedError::HeaderCellNotString { address: address() }),
        }
    }

    Ok(columns)
}

/// 定位并读取表头
pub fn extract_header(sheet: &Sheet, margin: Margin, coercer: &CellCoercer<'_>) -> SeedResult<Vec<String>> {
    let header = locate_header(sheet, margin)?;
    header_columns(sheet, &header, margin, coercer)
}
