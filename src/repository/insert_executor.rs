// ==========================================
// Sheet Seed - 插入操作执行器
// ==========================================
// 职责: 在一个 SQLite 事务中按顺序执行 Operation
// 列顺序: 工作表列 → 不在工作表中的默认值列 → 尚未覆盖的生成器列
// 覆盖规则: 工作表列优先；同一列同时有默认值和生成器时使用生成器
// 红线: 不做 DDL，不改写数据，任一错误整体回滚
// ==========================================

use crate::domain::cell::Value;
use crate::domain::operation::Operation;
use crate::generator::GeneratorHandle;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::{ToSql, ToSqlOutput};
use rusqlite::{Connection, Transaction};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// 执行结果汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// 已执行的操作数
    pub operations: usize,
    /// 已插入的行数
    pub rows: usize,
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Null => Ok(ToSqlOutput::from(rusqlite::types::Null)),
            Value::Boolean(b) => Ok(ToSqlOutput::from(*b)),
            Value::Integer(i) => Ok(ToSqlOutput::from(*i)),
            Value::Number(n) => Ok(ToSqlOutput::from(*n)),
            Value::DateTime(dt) => dt.to_sql(),
            Value::Text(s) => Ok(ToSqlOutput::from(s.as_str())),
        }
    }
}

// 附加列的取值来源
enum ColumnSource<'a> {
    Default(&'a Value),
    Generator(&'a GeneratorHandle),
}

struct ExtraColumn<'a> {
    name: &'a str,
    source: ColumnSource<'a>,
}

// ==========================================
// InsertExecutor
// ==========================================
pub struct InsertExecutor;

impl InsertExecutor {
    /// 在一个事务中执行全部操作
    ///
    /// # 返回
    /// - Ok(ExecutionSummary): 全部提交
    /// - Err: 第一个失败的操作；事务已回滚
    #[instrument(skip_all, fields(operations = operations.len()))]
    pub fn execute(conn: &mut Connection, operations: &[Operation]) -> RepositoryResult<ExecutionSummary> {
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut summary = ExecutionSummary::default();
        for operation in operations {
            let rows = Self::execute_operation(&tx, operation)?;
            debug!(table = %operation.table(), rows, "插入操作执行完成");
            summary.operations += 1;
            summary.rows += rows;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        info!(operations = summary.operations, rows = summary.rows, "事务已提交");
        Ok(summary)
    }

    fn execute_operation(tx: &Transaction, operation: &Operation) -> RepositoryResult<usize> {
        let table = operation.table();
        let extras = extra_columns(operation);
        let sql = insert_sql(table, operation.columns(), &extras);
        debug!(table, sql = %sql, "准备插入语句");

        let mut stmt = tx
            .prepare(&sql)
            .map_err(|e| RepositoryError::from(e).in_table(table))?;

        let width = operation.columns().len();
        let mut count = 0;
        for row in operation.rows() {
            if row.len() != width {
                return Err(RepositoryError::RowWidthMismatch {
                    table: table.to_string(),
                    expected: width,
                    actual: row.len(),
                });
            }

            let mut extra_values = Vec::with_capacity(extras.len());
            for extra in &extras {
                let value = match extra.source {
                    ColumnSource::Default(value) => value.clone(),
                    ColumnSource::Generator(generator) => {
                        generator
                            .next_value()
                            .map_err(|message| RepositoryError::GeneratorError {
                                table: table.to_string(),
                                column: extra.name.to_string(),
                                message,
                            })?
                    }
                };
                extra_values.push(value);
            }

            let params: Vec<&dyn ToSql> = row
                .iter()
                .chain(extra_values.iter())
                .map(|value| value as &dyn ToSql)
                .collect();
            stmt.execute(params.as_slice())
                .map_err(|e| RepositoryError::from(e).in_table(table))?;
            count += 1;
        }

        Ok(count)
    }
}

fn extra_columns(operation: &Operation) -> Vec<ExtraColumn<'_>> {
    let columns = operation.columns();
    let generators = operation.generated_values();
    let mut extras: Vec<ExtraColumn<'_>> = Vec::new();

    for (name, value) in operation.default_values() {
        if columns.contains(name) {
            continue;
        }
        let source = match generators.get(name) {
            Some(generator) => ColumnSource::Generator(generator),
            None => ColumnSource::Default(value),
        };
        extras.push(ExtraColumn { name, source });
    }

    for (name, generator) in generators {
        if columns.contains(name) || extras.iter().any(|extra| extra.name == name.as_str()) {
            continue;
        }
        extras.push(ExtraColumn {
            name,
            source: ColumnSource::Generator(generator),
        });
    }

    extras
}

fn insert_sql(table: &str, columns: &[String], extras: &[ExtraColumn<'_>]) -> String {
    let names: Vec<String> = columns
        .iter()
        .map(String::as_str)
        .chain(extras.iter().map(|extra| extra.name))
        .map(quote_identifier)
        .collect();

    if names.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(table));
    }

    let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        names.join(", "),
        placeholders.join(", ")
    )
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
