// ==========================================
// Sheet Seed - 插入操作
// ==========================================
// 一个 Operation = 一张表的一次批量插入:
//   表名 + 列清单 + 行值元组 + 列级默认值/生成器指令
// 默认值和生成器不写入行元组，由执行层逐行折叠
// ==========================================

use crate::domain::cell::Value;
use crate::generator::{GeneratorHandle, ValueGenerator};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    default_values: IndexMap<String, Value>,
    generated_values: IndexMap<String, GeneratorHandle>,
}

impl Operation {
    /// 开始构建一张表的插入操作
    pub fn insert_into(table: impl Into<String>) -> InsertBuilder {
        InsertBuilder::new(table)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// 工作表表头派生的列（按表头顺序）
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn default_values(&self) -> &IndexMap<String, Value> {
        &self.default_values
    }

    pub fn generated_values(&self) -> &IndexMap<String, GeneratorHandle> {
        &self.generated_values
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ==========================================
// InsertBuilder
// ==========================================
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    default_values: IndexMap<String, Value>,
    generated_values: IndexMap<String, GeneratorHandle>,
}

impl InsertBuilder {
    fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            default_values: IndexMap::new(),
            generated_values: IndexMap::new(),
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// 追加一行；值的个数应与列数一致
    pub fn values(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_default_value(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_values.insert(column.into(), value.into());
        self
    }

    pub fn with_generated_value(mut self, column: impl Into<String>, generator: GeneratorHandle) -> Self {
        self.generated_values.insert(column.into(), generator);
        self
    }

    pub fn with_generator<G: ValueGenerator + 'static>(self, column: impl Into<String>, generator: G) -> Self {
        self.with_generated_value(column, GeneratorHandle::new(generator))
    }

    pub fn build(self) -> Operation {
        Operation {
            table: self.table,
            columns: self.columns,
            rows: self.rows,
            default_values: self.default_values,
            generated_values: self.generated_values,
        }
    }
}
