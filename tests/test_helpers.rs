// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 内存工作簿构造、xlsx 夹具生成、测试数据库初始化
// ==========================================

#![allow(dead_code)]

use rusqlite::Connection;
use rust_xlsxwriter::{ExcelDateTime, Format, Formula};
use sheet_seed::{Cell, ImportBuilder, ImportPlan, Sheet, SheetVisibility, Workbook};
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

// ==========================================
// 内存工作簿
// ==========================================

/// 表头位于 (0, 0) 的工作表，数据行为文本
pub fn text_sheet(name: &str, header: &[&str], rows: &[&[&str]]) -> Sheet {
    let mut sheet = Sheet::new(name).with_row(0, 0, header.iter().map(|h| Cell::text(*h)));
    for (i, row) in rows.iter().enumerate() {
        sheet = sheet.with_row(i as u32 + 1, 0, row.iter().map(|v| Cell::text(*v)));
    }
    sheet
}

/// 四张可见工作表 table_11 / table_12 / table_21 / table_22，各一列一行
pub fn numbered_workbook() -> Workbook {
    ["table_11", "table_12", "table_21", "table_22"]
        .into_iter()
        .fold(Workbook::new(), |wb, name| {
            wb.with_sheet(text_sheet(name, &["a"], &[&[name]]))
        })
}

pub fn hidden(sheet: Sheet) -> Sheet {
    sheet.with_visibility(SheetVisibility::Hidden)
}

pub fn very_hidden(sheet: Sheet) -> Sheet {
    sheet.with_visibility(SheetVisibility::VeryHidden)
}

/// 不访问文件系统的计划构建器（配合 operations_from 使用）
pub fn in_memory_builder() -> ImportBuilder {
    ImportBuilder::from_path("in-memory.xlsx")
}

pub fn default_plan() -> ImportPlan {
    in_memory_builder().build().expect("构建默认计划失败")
}

// ==========================================
// xlsx 夹具
// ==========================================

/// 生成端到端测试用工作簿
///
/// - table_1: 表头 [a, b, c]，两行数据（数值/文本/日期），第二行 b 为空
/// - table_2: 表头位于 (2, 1)，含一个带缓存结果的公式
/// - hidden_3: 隐藏工作表
pub fn write_seed_workbook(dir: &TempDir) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.path().join("seed.xlsx");
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let sheet = workbook.add_worksheet();
    sheet.set_name("table_1")?;
    sheet.write_string(0, 0, "a")?;
    sheet.write_string(0, 1, "b")?;
    sheet.write_string(0, 2, "c")?;
    sheet.write_number(1, 0, 1.5)?;
    sheet.write_string(1, 1, "x")?;
    sheet.write_datetime_with_format(1, 2, &ExcelDateTime::from_ymd(2020, 1, 1)?, &date_format)?;
    sheet.write_number(2, 0, 2.0)?;
    sheet.write_boolean(2, 2, true)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("table_2")?;
    sheet.write_string(2, 1, "n")?;
    sheet.write_string(2, 2, "total")?;
    sheet.write_number(3, 1, 3.0)?;
    sheet.write_formula(3, 2, Formula::new("=B4*2").set_result("6"))?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("hidden_3")?;
    sheet.write_string(0, 0, "a")?;
    sheet.write_number(1, 0, 9.0)?;
    sheet.set_hidden(true);

    workbook.save(&path)?;
    Ok(path)
}

// ==========================================
// 测试数据库
// ==========================================

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().ok_or("非 UTF-8 路径")?.to_string();

    let conn = Connection::open(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 初始化 schema（与 write_seed_workbook 对应）
pub fn init_schema(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS table_1 (
            id INTEGER PRIMARY KEY,
            a REAL,
            b TEXT,
            c TEXT,
            source TEXT NOT NULL,
            note TEXT
        );
        CREATE TABLE IF NOT EXISTS table_2 (
            n REAL,
            total REAL,
            code TEXT
        );
        CREATE TABLE IF NOT EXISTS hidden_3 (
            a REAL
        );
        "#,
    )?;
    Ok(())
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table), [], |row| row.get(0))
        .expect("统计行数失败")
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}
