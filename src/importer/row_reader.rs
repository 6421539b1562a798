// ==========================================
// Sheet Seed - 数据行读取
// ==========================================
// 规则:
// - 起始行 = margin.top + 1 + skip_after_header
// - 逐行向下读取，遇到第一个不存在的行即停止（不跳过空洞）
// - 每行宽度 = 表头宽度；缺失单元格为 Null，多余单元格忽略
// - 行顺序原样保留
// ==========================================

use crate::domain::cell::Value;
use crate::domain::types::Margin;
use crate::domain::workbook::Sheet;
use crate::importer::cell_coercer::CellCoercer;
use crate::importer::error::SeedResult;

/// 读取表头下方的数据行
///
/// # 参数
/// - width: 表头列数
/// - skip_after_header: 表头与第一行数据之间跳过的行数
pub fn read_rows(
    sheet: &Sheet,
    width: usize,
    margin: Margin,
    skip_after_header: u32,
    coercer: &CellCoercer<'_>,
) -> SeedResult<Vec<Vec<Value>>> {
    let mut rows = Vec::new();
    let Some(mut row_index) = margin
        .top
        .checked_add(1)
        .and_then(|r| r.checked_add(skip_after_header))
    else {
        return Ok(rows);
    };

    while let Some(row) = sheet.row(row_index) {
        let mut values = Vec::with_capacity(width);
        for offset in 0..width {
            let col = margin.left + offset as u32;
            let value = match row.cell(col) {
                Some(cell) => coercer.coerce(sheet, row_index, col, cell)?,
                None => Value::Null,
            };
            values.push(value);
        }
        rows.push(values);

        row_index = match row_index.checked_add(1) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::Cell;
    use crate::importer::error::SeedError;
    use crate::importer::import_trait::CachedValueEvaluator;

    fn read(sheet: &Sheet, width: usize, margin: Margin, skip: u32) -> SeedResult<Vec<Vec<Value>>> {
        let evaluator = CachedValueEvaluator;
        read_rows(sheet, width, margin, skip, &CellCoercer::new(&evaluator))
    }

    #[test]
    fn test_rows_below_header() {
        let sheet = Sheet::new("t")
            .with_row(0, 0, vec![Cell::text("a"), Cell::text("b")])
            .with_row(1, 0, vec![Cell::number(1.0), Cell::text("x")])
            .with_row(2, 0, vec![Cell::number(2.0), Cell::text("y")]);

        let rows = read(&sheet, 2, Margin::default(), 0).unwrap();
        assert_eq!(
            rows,
            vec![
                vec![Value::Number(1.0), Value::Text("x".to_string())],
                vec![Value::Number(2.0), Value::Text("y".to_string())],
            ]
        );
    }

    #[test]
    fn test_missing_cells_padded_and_extra_cells_ignored() {
        let sheet = Sheet::new("t")
            .with_cell(1, 0, Cell::number(1.0))
            .with_row(2, 0, vec![Cell::number(2.0), Cell::text("y"), Cell::text("extra")]);

        let rows = read(&sheet, 2, Margin::default(), 0).unwrap();
        assert_eq!(rows[0], vec![Value::Number(1.0), Value::Null]);
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn test_first_missing_row_stops_reading() {
        let sheet = Sheet::new("t")
            .with_cell(1, 0, Cell::number(1.0))
            .with_cell(3, 0, Cell::number(3.0));

        let rows = read(&sheet, 1, Margin::default(), 0).unwrap();
        assert_eq!(rows, vec![vec![Value::Number(1.0)]]);
    }

    #[test]
    fn test_margin_and_skip_after_header() {
        let sheet = Sheet::new("t")
            .with_row(2, 1, vec![Cell::text("a"), Cell::text("b")])
            .with_row(3, 1, vec![Cell::text("comment"), Cell::text("comment")])
            .with_row(4, 1, vec![Cell::number(1.0), Cell::number(2.0)])
            .with_row(5, 1, vec![Cell::number(3.0), Cell::number(4.0)]);

        let rows = read(&sheet, 2, Margin::new(1, 2), 1).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![Value::Number(1.0), Value::Number(2.0)]);
    }

    #[test]
    fn test_error_cell_reports_data_row_address() {
        let sheet = Sheet::new("table_2")
            .with_row(1, 0, vec![Cell::number(1.0), Cell::text("ok")])
            .with_row(3, 0, vec![Cell::number(1.0), Cell::error("#REF!")])
            .with_row(2, 0, vec![Cell::number(2.0), Cell::text("ok")]);

        let err = read(&sheet, 2, Margin::default(), 0).unwrap_err();
        match err {
            SeedError::CellError { address } => assert_eq!(address.to_string(), "table_2!B4"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
