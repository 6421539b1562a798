// ==========================================
// Sheet Seed - 导入接口 Trait
// ==========================================
// 职责: 定义导入核心依赖的外部能力
//   - FormulaEvaluator: 公式单元格 → 具体单元格
//   - TableNameResolver: 工作表名 → 表名
// ==========================================

use crate::domain::cell::Cell;
use crate::domain::workbook::Sheet;
use crate::importer::error::SeedResult;
use indexmap::IndexMap;

// ==========================================
// FormulaEvaluator Trait
// ==========================================
// 实现者: CachedValueEvaluator（使用工作簿保存的计算结果）
pub trait FormulaEvaluator {
    /// 解析公式单元格
    ///
    /// # 参数
    /// - sheet: 公式所在工作表
    /// - row / col: 公式单元格位置（0 基）
    /// - formula: 公式文本
    ///
    /// # 返回
    /// - Ok(Cell): 计算结果（应为非公式单元格）
    fn evaluate(&self, sheet: &Sheet, row: u32, col: u32, formula: &str) -> SeedResult<Cell>;
}

/// 读取工作簿中保存的公式计算结果；没有结果时视为空白
#[derive(Debug, Clone, Copy, Default)]
pub struct CachedValueEvaluator;

impl FormulaEvaluator for CachedValueEvaluator {
    fn evaluate(&self, sheet: &Sheet, row: u32, col: u32, _formula: &str) -> SeedResult<Cell> {
        Ok(sheet.cached_result(row, col).cloned().unwrap_or(Cell::Blank))
    }
}

// ==========================================
// TableNameResolver Trait
// ==========================================
// 实现者: IdentityResolver / MappedResolver / 任意 Fn(&str) -> Option<String>
pub trait TableNameResolver: Send + Sync {
    /// 工作表名 → 表名；None 表示无法解析
    fn resolve(&self, sheet_name: &str) -> Option<String>;
}

impl<F> TableNameResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn resolve(&self, sheet_name: &str) -> Option<String> {
        self(sheet_name)
    }
}

/// 表名 = 工作表名
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl TableNameResolver for IdentityResolver {
    fn resolve(&self, sheet_name: &str) -> Option<String> {
        Some(sheet_name.to_string())
    }
}

/// 静态映射表；未登记的工作表无法解析
#[derive(Debug, Clone, Default)]
pub struct MappedResolver {
    mapping: IndexMap<String, String>,
}

impl MappedResolver {
    pub fn new(mapping: IndexMap<String, String>) -> Self {
        Self { mapping }
    }

    pub fn with(mut self, sheet: impl Into<String>, table: impl Into<String>) -> Self {
        self.mapping.insert(sheet.into(), table.into());
        self
    }
}

impl TableNameResolver for MappedResolver {
    fn resolve(&self, sheet_name: &str) -> Option<String> {
        self.mapping.get(sheet_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_value_evaluator() {
        let mut sheet = Sheet::new("s").with_cell(0, 0, Cell::formula("1+1"));
        sheet.set_cached_result(0, 0, Cell::number(2.0));

        let evaluator = CachedValueEvaluator;
        assert_eq!(evaluator.evaluate(&sheet, 0, 0, "1+1").unwrap(), Cell::number(2.0));
        assert_eq!(evaluator.evaluate(&sheet, 5, 5, "A1").unwrap(), Cell::Blank);
    }

    #[test]
    fn test_resolvers() {
        assert_eq!(IdentityResolver.resolve("t1"), Some("t1".to_string()));

        let mapped = MappedResolver::default().with("Sheet1", "table_1");
        assert_eq!(mapped.resolve("Sheet1"), Some("table_1".to_string()));
        assert_eq!(mapped.resolve("Sheet2"), None);

        let f = |name: &str| name.strip_prefix("t_").map(str::to_string);
        assert_eq!(f.resolve("t_user"), Some("user".to_string()));
        assert_eq!(f.resolve("user"), None);
    }
}
