// ==========================================
// Sheet Seed - 执行层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 插入失败时携带表名，便于定位工作表
// ==========================================

use thiserror::Error;

/// 执行层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    #[error("非空约束违反: {0}")]
    NotNullViolation(String),

    // ===== 插入语句 =====
    #[error("插入失败 (table={table}): {source}")]
    InsertFailed {
        table: String,
        #[source]
        source: Box<RepositoryError>,
    },

    #[error("行宽与列数不一致 (table={table}): expected={expected}, actual={actual}")]
    RowWidthMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("值生成失败 (table={table}, column={column}): {message}")]
    GeneratorError {
        table: String,
        column: String,
        message: String,
    },
}

impl RepositoryError {
    /// 为错误附加表名
    pub fn in_table(self, table: &str) -> Self {
        match self {
            RepositoryError::InsertFailed { .. }
            | RepositoryError::RowWidthMismatch { .. }
            | RepositoryError::GeneratorError { .. } => self,
            other => RepositoryError::InsertFailed {
                table: table.to_string(),
                source: Box::new(other),
            },
        }
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else if msg.contains("NOT NULL") {
                    RepositoryError::NotNullViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::SqliteFailure(code, None) => {
                RepositoryError::DatabaseQueryError(code.to_string())
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
