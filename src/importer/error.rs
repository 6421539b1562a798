// ==========================================
// Sheet Seed - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 文档内容错误必须携带精确位置（工作表名 + A1 地址 / 行号）
//       配置错误必须携带参数名
// ==========================================

use crate::domain::types::CellAddress;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum SeedError {
    // ===== 配置错误 =====
    #[error("配置无效 ({parameter}): {message}")]
    InvalidConfiguration { parameter: String, message: String },

    #[error("配置已构建，不能再修改")]
    AlreadyBuilt,

    // ===== 文件相关错误 =====
    #[error("资源不存在: {0}")]
    ResourceNotFound(String),

    #[error("工作簿打开失败: {0}")]
    WorkbookOpenError(String),

    // ===== 表头错误 =====
    #[error("表头行不存在: {sheet}[{row}]")]
    HeaderRowNotFound { sheet: String, row: u32 },

    #[error("表头单元格不能为空: {address}")]
    HeaderCellBlank { address: CellAddress },

    #[error("表头单元格必须是字符串: {address}")]
    HeaderCellNotString { address: CellAddress },

    // ===== 单元格错误 =====
    #[error("单元格包含错误值: {address}")]
    CellError { address: CellAddress },

    #[error("不支持的单元格类型: {address}")]
    UnsupportedCellType { address: CellAddress },

    // ===== 表名解析 =====
    #[error("无法解析表名: {sheet}")]
    UnresolvedTableName { sheet: String },

    // ===== 执行阶段 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 错误种类（不含负载，便于调用方按类别匹配）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidConfiguration,
    AlreadyBuilt,
    ResourceNotFound,
    WorkbookOpen,
    HeaderRowNotFound,
    HeaderCellBlank,
    HeaderCellNotString,
    CellError,
    UnsupportedCellType,
    UnresolvedTableName,
    Execution,
}

impl SeedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SeedError::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            SeedError::AlreadyBuilt => ErrorKind::AlreadyBuilt,
            SeedError::ResourceNotFound(_) => ErrorKind::ResourceNotFound,
            SeedError::WorkbookOpenError(_) => ErrorKind::WorkbookOpen,
            SeedError::HeaderRowNotFound { .. } => ErrorKind::HeaderRowNotFound,
            SeedError::HeaderCellBlank { .. } => ErrorKind::HeaderCellBlank,
            SeedError::HeaderCellNotString { .. } => ErrorKind::HeaderCellNotString,
            SeedError::CellError { .. } => ErrorKind::CellError,
            SeedError::UnsupportedCellType { .. } => ErrorKind::UnsupportedCellType,
            SeedError::UnresolvedTableName { .. } => ErrorKind::UnresolvedTableName,
            SeedError::Repository(_) => ErrorKind::Execution,
        }
    }

    /// 构造配置错误
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        SeedError::InvalidConfiguration {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for SeedError {
    fn from(err: std::io::Error) -> Self {
        SeedError::WorkbookOpenError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for SeedError {
    fn from(err: calamine::Error) -> Self {
        SeedError::WorkbookOpenError(err.to_string())
    }
}

/// Result 类型别名
pub type SeedResult<T> = Result<T, SeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_location() {
        let err = SeedError::CellError {
            address: CellAddress::new("table_2", 3, 1),
        };
        assert_eq!(err.to_string(), "单元格包含错误值: table_2!B4");
        assert_eq!(err.kind(), ErrorKind::CellError);

        let err = SeedError::HeaderRowNotFound {
            sheet: "table_1".to_string(),
            row: 2,
        };
        assert_eq!(err.to_string(), "表头行不存在: table_1[2]");
    }

    #[test]
    fn test_invalid_config_names_parameter() {
        let err = SeedError::invalid_config("left", "必须大于等于 0");
        assert!(err.to_string().contains("left"));
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }
}
