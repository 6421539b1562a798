// ==========================================
// Sheet Seed - 单元格值转换
// ==========================================
// 职责: 原始单元格 → 规范值（无状态）
//   数值          → Number
//   日期格式数值  → DateTime（不做时区转换）
//   字符串        → Text（不 trim，不推断类型）
//   布尔          → Boolean
//   空白          → Null
//   公式          → 经 FormulaEvaluator 解析一次后递归转换
//   错误值        → CellError
//   其他          → UnsupportedCellType
// ==========================================

use crate::domain::cell::{Cell, Value};
use crate::domain::types::CellAddress;
use crate::domain::workbook::Sheet;
use crate::importer::error::{SeedError, SeedResult};
use crate::importer::import_trait::FormulaEvaluator;
use chrono::{Duration, NaiveDate, NaiveDateTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

// ==========================================
// CellCoercer
// ==========================================
pub struct CellCoercer<'a> {
    evaluator: &'a dyn FormulaEvaluator,
}

impl<'a> CellCoercer<'a> {
    pub fn new(evaluator: &'a dyn FormulaEvaluator) -> Self {
        Self { evaluator }
    }

    /// 转换一个单元格
    ///
    /// # 参数
    /// - sheet: 单元格所在工作表（用于错误定位和公式解析）
    /// - row / col: 单元格位置（0 基）
    /// - cell: 原始单元格
    pub fn coerce(&self, sheet: &Sheet, row: u32, col: u32, cell: &Cell) -> SeedResult<Value> {
        match cell {
            Cell::Numeric {
                value,
                date_formatted: false,
            } => Ok(Value::Number(*value)),
            Cell::Numeric {
                value,
                date_formatted: true,
            } => excel_serial_to_datetime(*value)
                .map(Value::DateTime)
                .ok_or_else(|| SeedError::UnsupportedCellType {
                    address: CellAddress::new(sheet.name(), row, col),
                }),
            Cell::Text(s) => Ok(Value::Text(s.clone())),
            Cell::Boolean(b) => Ok(Value::Boolean(*b)),
            Cell::Formula(formula) => {
                let evaluated = self.evaluator.evaluate(sheet, row, col, formula)?;
                self.coerce(sheet, row, col, &evaluated)
            }
            Cell::Blank => Ok(Value::Null),
            Cell::Error(_) => Err(SeedError::CellError {
                address: CellAddress::new(sheet.name(), row, col),
            }),
            Cell::Unsupported(_) => Err(SeedError::UnsupportedCellType {
                address: CellAddress::new(sheet.name(), row, col),
            }),
        }
    }
}

/// Excel 序列值（1900 日期系统）→ 本地日期时间
///
/// 1900 系统把 1900-02-29 当作有效日期：序列值 < 61 时以 1899-12-31 为第 0 天，
/// 否则以 1899-12-30 为第 0 天。日内时间四舍五入到毫秒。
/// 负数或超出 chrono 范围时返回 None。
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let whole_days = serial.floor();
    let mut millis = ((serial - whole_days) * MILLIS_PER_DAY).round() as i64;
    let mut days = whole_days as i64;
    if millis >= MILLIS_PER_DAY as i64 {
        days += 1;
        millis -= MILLIS_PER_DAY as i64;
    }

    let epoch = if whole_days < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::try_days(days)?)?
        .checked_add_signed(Duration::try_milliseconds(millis)?)
}
