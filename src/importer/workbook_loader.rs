// ==========================================
// Sheet Seed - 工作簿加载
// ==========================================
// 支持: .xlsx / .xlsm / .xlsb / .xls / .ods（calamine 自动识别）
// 输出: 只读稀疏快照 Workbook
//   - Empty 单元格视为缺失；至少含一个单元格的行才存在
//   - 公式单元格 → Cell::Formula，原值作为缓存结果保留
// 资源: calamine 句柄在函数返回前释放（正常/出错路径一致）
// ==========================================

use crate::domain::cell::Cell;
use crate::domain::types::SheetVisibility;
use crate::domain::workbook::{Sheet, Workbook};
use crate::importer::error::{SeedError, SeedResult};
use calamine::{open_workbook_auto, Data, Reader, SheetType, SheetVisible};
use std::path::Path;
use tracing::{debug, warn};

/// 打开工作簿并生成快照
pub fn load_workbook<P: AsRef<Path>>(path: P) -> SeedResult<Workbook> {
    let path = path.as_ref();

    // 检查文件存在
    if !path.exists() {
        return Err(SeedError::ResourceNotFound(path.display().to_string()));
    }

    let mut reader = open_workbook_auto(path)
        .map_err(|e| SeedError::WorkbookOpenError(format!("{}: {}", path.display(), e)))?;

    let metadata = reader.sheets_metadata().to_vec();
    let mut workbook = Workbook::new();

    for meta in metadata {
        if !matches!(meta.typ, SheetType::WorkSheet) {
            debug!(sheet = %meta.name, typ = ?meta.typ, "跳过非工作表");
            continue;
        }

        let mut sheet = Sheet::new(meta.name.clone()).with_visibility(match meta.visible {
            SheetVisible::Visible => SheetVisibility::Visible,
            SheetVisible::Hidden => SheetVisibility::Hidden,
            SheetVisible::VeryHidden => SheetVisibility::VeryHidden,
        });

        let range = reader
            .worksheet_range(&meta.name)
            .map_err(|e| SeedError::WorkbookOpenError(format!("{}: {}", meta.name, e)))?;
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));

        for (row, col, data) in range.used_cells() {
            let Some((row, col)) = absolute_position(row_offset, col_offset, row, col) else {
                warn!(sheet = %meta.name, row, col, "单元格坐标越界，已跳过");
                continue;
            };
            if let Some(cell) = convert_data(data) {
                sheet.set_cell(row, col, cell);
            }
        }

        // 部分格式不提供公式，缺失时只使用计算结果
        match reader.worksheet_formula(&meta.name) {
            Ok(formulas) => {
                let (row_offset, col_offset) = formulas.start().unwrap_or((0, 0));
                for (row, col, formula) in formulas.used_cells() {
                    let formula = formula.trim();
                    if formula.is_empty() {
                        continue;
                    }
                    let Some((row, col)) = absolute_position(row_offset, col_offset, row, col) else {
                        continue;
                    };
                    overlay_formula(&mut sheet, row, col, formula.trim_start_matches('='));
                }
            }
            Err(e) => {
                warn!(sheet = %meta.name, error = %e, "读取公式失败，使用缓存结果");
            }
        }

        debug!(sheet = %sheet.name(), rows = sheet.row_count(), "工作表加载完成");
        workbook.add_sheet(sheet);
    }

    Ok(workbook)
}

// calamine 的迭代坐标相对于 range.start()
fn absolute_position(row_offset: u32, col_offset: u32, row: usize, col: usize) -> Option<(u32, u32)> {
    let row = u32::try_from(row).ok()?.checked_add(row_offset)?;
    let col = u32::try_from(col).ok()?.checked_add(col_offset)?;
    Some((row, col))
}

fn overlay_formula(sheet: &mut Sheet, row: u32, col: u32, formula: &str) {
    let cached = sheet.row(row).and_then(|r| r.cell(col)).cloned();
    if let Some(cached) = cached {
        sheet.set_cached_result(row, col, cached);
    }
    sheet.set_cell(row, col, Cell::formula(formula));
}

/// calamine Data → Cell；Empty 返回 None（缺失）
pub fn convert_data(data: &Data) -> Option<Cell> {
    let cell = match data {
        Data::Empty => return None,
        Data::Int(i) => Cell::number(*i as f64),
        Data::Float(f) => Cell::number(*f),
        Data::DateTime(dt) => Cell::Numeric {
            value: dt.as_f64(),
            date_formatted: dt.is_datetime(),
        },
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Boolean(*b),
        Data::Error(e) => Cell::Error(e.to_string()),
        Data::DateTimeIso(_) => Cell::Unsupported("DateTimeIso".to_string()),
        Data::DurationIso(_) => Cell::Unsupported("DurationIso".to_string()),
    };
    Some(cell)
}
