// ==========================================
// Sheet Seed - 核心库
// ==========================================
// 职责: 电子表格工作簿 → 有序的数据库插入操作
// 技术栈: calamine + rusqlite
// 数据流: 工作簿 → 工作表选择 → 表头/数据行 → Operation → SQLite 事务
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 工作簿快照、单元格、插入操作
pub mod domain;

// 值生成器
pub mod generator;

// 导入层 - 工作簿转换
pub mod importer;

// 配置层 - 导入配置
pub mod config;

// 执行层 - 插入操作落库
pub mod repository;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{Cell, CellAddress, Margin, Operation, Row, Sheet, SheetVisibility, Value, Workbook};

// 生成器
pub use generator::{date_sequence, sequence, string_sequence, GeneratorHandle, ValueGenerator};

// 导入
pub use importer::{ErrorKind, SeedError, SeedResult, SpreadsheetImporter, TableNameResolver};

// 配置
pub use config::{ImportBuilder, ImportPlan, ImportSettings, ResourceLocator};

// 执行
pub use repository::{ExecutionSummary, InsertExecutor, RepositoryError};

// ==========================================
// 常量定义
// ==========================================

// 版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 名称
pub const APP_NAME: &str = "sheet-seed";
