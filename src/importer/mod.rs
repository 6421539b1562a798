// ==========================================
// Sheet Seed - 导入层
// ==========================================
// 职责: 工作簿 → 有序插入操作序列
// 支持: Excel (.xlsx/.xlsm/.xlsb/.xls), OpenDocument (.ods)
// ==========================================

// 模块声明
pub mod cell_coercer;
pub mod error;
pub mod header_extractor;
pub mod import_trait;
pub mod operation_assembler;
pub mod row_reader;
pub mod sheet_selector;
pub mod spreadsheet_importer;
pub mod workbook_loader;

// 重导出核心类型
pub use cell_coercer::{excel_serial_to_datetime, CellCoercer};
pub use error::{ErrorKind, SeedError, SeedResult};
pub use header_extractor::{extract_header, header_columns, locate_header, HeaderRow};
pub use operation_assembler::{assemble_operation, resolve_table_name, DefaultValues, ValueGenerators};
pub use row_reader::read_rows;
pub use sheet_selector::{select_sheets, SelectedSheet, SheetFilter};
pub use spreadsheet_importer::SpreadsheetImporter;
pub use workbook_loader::load_workbook;

// 重导出 Trait 接口
pub use import_trait::{
    CachedValueEvaluator, FormulaEvaluator, IdentityResolver, MappedResolver, TableNameResolver,
};
