// ==========================================
// Sheet Seed - 执行层
// ==========================================
// 职责: 把 Operation 序列写入 SQLite
// 约束: 所有值使用参数绑定；标识符统一加双引号
// ==========================================

pub mod error;
pub mod insert_executor;

pub use error::{RepositoryError, RepositoryResult};
pub use insert_executor::{ExecutionSummary, InsertExecutor};
