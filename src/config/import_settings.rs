// ==========================================
// Sheet Seed - 文件化导入配置
// ==========================================
// 格式: JSON（serde_json）
// 约定: 所有字段可选；apply() 逐项调用 ImportBuilder 的方法，
//       校验规则与程序化配置完全一致
// ==========================================

use crate::config::import_builder::ImportBuilder;
use crate::domain::cell::Value;
use crate::generator::sequence;
use crate::importer::error::{SeedError, SeedResult};
use crate::importer::import_trait::MappedResolver;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 导入配置文件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// 数据起始列（0 基）
    pub left: Option<i64>,

    /// 表头所在行（0 基）
    pub top: Option<i64>,

    /// 表头后跳过的行数
    pub skip_after_header: Option<i64>,

    /// 工作表名 include 正则（整串匹配）
    pub include: Vec<String>,

    /// 工作表名 exclude 正则（整串匹配）
    pub exclude: Vec<String>,

    /// 工作表名 → 表名；为空时表名 = 工作表名
    pub table_names: IndexMap<String, String>,

    /// 表名 → 列名 → 默认值（JSON 字面量，null 表示写入 NULL）
    pub default_values: IndexMap<String, IndexMap<String, serde_json::Value>>,

    /// 表名 → 列名 → 整数序列
    pub sequences: IndexMap<String, IndexMap<String, SequenceSettings>>,
}

/// 整数序列生成器参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceSettings {
    pub start: i64,
    pub increment: i64,
}

impl Default for SequenceSettings {
    fn default() -> Self {
        Self {
            start: 1,
            increment: 1,
        }
    }
}

impl ImportSettings {
    pub fn from_json_str(json: &str) -> SeedResult<Self> {
        serde_json::from_str(json).map_err(|e| SeedError::invalid_config("settings", e.to_string()))
    }

    /// 读取配置文件
    ///
    /// # 返回
    /// - Err(ResourceNotFound): 文件不存在
    /// - Err(InvalidConfiguration): 读取或解析失败
    pub fn from_file<P: AsRef<Path>>(path: P) -> SeedResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SeedError::ResourceNotFound(path.display().to_string()));
        }
        let json = fs::read_to_string(path)
            .map_err(|e| SeedError::invalid_config("settings", format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// 把配置逐项写入构建器
    pub fn apply(&self, builder: &mut ImportBuilder) -> SeedResult<()> {
        if let Some(left) = self.left {
            builder.left(left)?;
        }
        if let Some(top) = self.top {
            builder.top(top)?;
        }
        if let Some(rows) = self.skip_after_header {
            builder.skip_after_header(rows)?;
        }
        builder.include(self.include.iter().cloned())?;
        builder.exclude(self.exclude.iter().cloned())?;

        if !self.table_names.is_empty() {
            builder.resolver(MappedResolver::new(self.table_names.clone()))?;
        }

        for (table, columns) in &self.default_values {
            for (column, literal) in columns {
                builder.with_default_value(table, column, Value::from(literal.clone()))?;
            }
        }

        for (table, columns) in &self.sequences {
            for (column, settings) in columns {
                let generator = sequence()
                    .starting_at(settings.start)
                    .incrementing_by(settings.increment);
                builder.with_generated_value(table, column, generator)?;
            }
        }

        Ok(())
    }
}
