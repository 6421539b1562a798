// ==========================================
// Sheet Seed - 表名解析与操作组装
// ==========================================
// 职责: 工作表名 → 表名；表头 + 数据行 + 默认值/生成器 → Operation
// 规则:
// - 解析失败 → UnresolvedTableName
// - 默认值/生成器以列级指令挂到 Operation 上，不写入行元组
// - 默认值/生成器按表名（而非工作表名）查找
// ==========================================

use crate::domain::cell::Value;
use crate::domain::operation::Operation;
use crate::generator::GeneratorHandle;
use crate::importer::error::{SeedError, SeedResult};
use crate::importer::import_trait::TableNameResolver;
use indexmap::IndexMap;

/// 表名 → 列名 → 默认值
pub type DefaultValues = IndexMap<String, IndexMap<String, Value>>;

/// 表名 → 列名 → 生成器
pub type ValueGenerators = IndexMap<String, IndexMap<String, GeneratorHandle>>;

/// 解析表名
pub fn resolve_table_name(resolver: &dyn TableNameResolver, sheet_name: &str) -> SeedResult<String> {
    resolver
        .resolve(sheet_name)
        .ok_or_else(|| SeedError::UnresolvedTableName {
            sheet: sheet_name.to_string(),
        })
}

/// 组装一张工作表的插入操作
pub fn assemble_operation(
    table: &str,
    header: Vec<String>,
    rows: Vec<Vec<Value>>,
    default_values: &DefaultValues,
    generators: &ValueGenerators,
) -> Operation {
    let mut builder = Operation::insert_into(table).columns(header);

    if let Some(defaults) = default_values.get(table) {
        for (column, value) in defaults {
            builder = builder.with_default_value(column.clone(), value.clone());
        }
    }
    if let Some(table_generators) = generators.get(table) {
        for (column, generator) in table_generators {
            builder = builder.with_generated_value(column.clone(), generator.clone());
        }
    }

    for row in rows {
        builder = builder.values(row);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::sequence;
    use crate::importer::error::ErrorKind;
    use crate::importer::import_trait::{IdentityResolver, MappedResolver};

    #[test]
    fn test_resolve_table_name() {
        assert_eq!(resolve_table_name(&IdentityResolver, "table_1").unwrap(), "table_1");

        let mapped = MappedResolver::default().with("Sheet1", "table_1");
        let err = resolve_table_name(&mapped, "Sheet2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnresolvedTableName);
        assert_eq!(err.to_string(), "无法解析表名: Sheet2");
    }

    #[test]
    fn test_defaults_attached_as_directives() {
        let mut defaults = DefaultValues::new();
        defaults
            .entry("table_1".to_string())
            .or_default()
            .insert("g".to_string(), Value::from("G"));
        defaults
            .entry("table_1".to_string())
            .or_default()
            .insert("i".to_string(), Value::Null);

        let rows = vec![vec![Value::Number(1.0), Value::from("x")]];
        let op = assemble_operation(
            "table_1",
            vec!["a".to_string(), "b".to_string()],
            rows.clone(),
            &defaults,
            &ValueGenerators::new(),
        );

        assert_eq!(op.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(op.rows(), rows.as_slice());
        assert_eq!(op.default_values().get("g"), Some(&Value::from("G")));
        assert_eq!(op.default_values().get("i"), Some(&Value::Null));
        assert!(op.generated_values().is_empty());
    }

    #[test]
    fn test_unconfigured_table_is_unmodified() {
        let mut generators = ValueGenerators::new();
        generators
            .entry("other".to_string())
            .or_default()
            .insert("id".to_string(), GeneratorHandle::new(sequence()));

        let op = assemble_operation(
            "table_2",
            vec!["a".to_string()],
            vec![vec![Value::Null]],
            &DefaultValues::new(),
            &generators,
        );
        assert!(op.default_values().is_empty());
        assert!(op.generated_values().is_empty());
        assert_eq!(op.row_count(), 1);
    }

    #[test]
    fn test_generator_handle_shared_with_operation() {
        let handle = GeneratorHandle::new(sequence());
        let mut generators = ValueGenerators::new();
        generators
            .entry("t".to_string())
            .or_default()
            .insert("id".to_string(), handle.clone());

        let op = assemble_operation("t", vec!["a".to_string()], vec![], &DefaultValues::new(), &generators);
        assert_eq!(op.generated_values().get("id"), Some(&handle));
    }
}
