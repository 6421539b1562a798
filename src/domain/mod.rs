// ==========================================
// Sheet Seed - 领域模型层
// ==========================================
// 职责: 工作簿快照、单元格、规范值、插入操作
// 红线: 不含文件读取逻辑，不含数据库逻辑
// ==========================================

pub mod cell;
pub mod operation;
pub mod types;
pub mod workbook;

// 重导出核心类型
pub use cell::{Cell, Value};
pub use operation::{InsertBuilder, Operation};
pub use types::{column_letters, CellAddress, Margin, SheetVisibility};
pub use workbook::{Row, Sheet, Workbook};
