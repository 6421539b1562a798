// ==========================================
// Sheet Seed - 命令行入口
// ==========================================
// 用法:
//   sheet-seed <db_path> <workbook> [settings.json]
// 输出: stdout 打印 JSON 执行汇总；日志写 stderr
// ==========================================

use anyhow::{bail, Context, Result};
use sheet_seed::config::{ImportBuilder, ImportSettings};
use sheet_seed::db::open_sqlite_connection;
use sheet_seed::logging;

fn main() -> Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let (Some(db_path), Some(workbook)) = (args.next(), args.next()) else {
        bail!("用法: sheet-seed <db_path> <workbook> [settings.json]");
    };
    let settings_path = args.next();

    tracing::info!("sheet-seed {}", sheet_seed::VERSION);

    let mut builder = ImportBuilder::excel(&workbook)
        .with_context(|| format!("无法定位工作簿: {}", workbook))?;

    if let Some(path) = settings_path {
        let settings = ImportSettings::from_file(&path)
            .with_context(|| format!("无法读取配置文件: {}", path))?;
        settings.apply(&mut builder)?;
    }

    let plan = builder.build()?;
    let mut conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;

    let summary = plan.launch(&mut conn)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
