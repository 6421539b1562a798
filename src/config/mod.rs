// ==========================================
// Sheet Seed - 配置层
// ==========================================
// 职责: 导入配置的构建、校验与文件加载
// 两阶段: ImportBuilder（可变）→ ImportPlan（不可变）
// ==========================================

pub mod import_builder;
pub mod import_settings;
pub mod resource_locator;

pub use import_builder::{ImportBuilder, ImportPlan};
pub use import_settings::{ImportSettings, SequenceSettings};
pub use resource_locator::{ResourceLocator, RESOURCE_PATH_ENV};
