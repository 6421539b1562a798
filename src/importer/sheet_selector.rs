// ==========================================
// Sheet Seed - 工作表选择
// ==========================================
// 规则:
// 1. 按工作簿自然顺序遍历（不按名称/模式重排）
// 2. Hidden / VeryHidden 工作表无条件跳过
// 3. 选中 ⇔ (include 为空 或 匹配任一 include) 且 不匹配任何 exclude
//    （include 与 exclude 同时匹配时 exclude 优先）
// 4. 正则按整串匹配；零匹配不是错误
// ==========================================

use crate::domain::workbook::{Sheet, Workbook};
use crate::importer::error::{SeedError, SeedResult};
use regex::Regex;
use tracing::debug;

// ==========================================
// SheetFilter - 已编译的 include/exclude 模式
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SheetFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl SheetFilter {
    /// 编译模式（整串匹配）
    ///
    /// # 返回
    /// - Err(InvalidConfiguration): 模式语法错误，参数名为 include / exclude
    pub fn compile<I, E>(include: I, exclude: E) -> SeedResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            include: compile_patterns("include", include)?,
            exclude: compile_patterns("exclude", exclude)?,
        })
    }

    pub fn accepts(&self, sheet_name: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|re| re.is_match(sheet_name));
        included && !self.exclude.iter().any(|re| re.is_match(sheet_name))
    }
}

fn compile_patterns<P>(parameter: &str, patterns: P) -> SeedResult<Vec<Regex>>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|p| {
            let p = p.as_ref();
            Regex::new(&format!("^(?:{})$", p))
                .map_err(|e| SeedError::invalid_config(parameter, format!("正则表达式无效 '{}': {}", p, e)))
        })
        .collect()
}

/// 选中的工作表
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedSheet<'w> {
    /// 在工作簿中的位置
    pub index: usize,
    pub sheet: &'w Sheet,
}

impl<'w> SelectedSheet<'w> {
    pub fn name(&self) -> &'w str {
        self.sheet.name()
    }
}

/// 选择参与导入的工作表
///
/// # 返回
/// - 按工作簿顺序排列的工作表引用，可能为空
pub fn select_sheets<'w>(workbook: &'w Workbook, filter: &SheetFilter) -> Vec<SelectedSheet<'w>> {
    let mut selected = Vec::new();
    for (index, sheet) in workbook.sheets().iter().enumerate() {
        if !sheet.visibility().is_visible() {
            debug!(sheet = %sheet.name(), visibility = %sheet.visibility(), "跳过隐藏工作表");
            continue;
        }
        if !filter.accepts(sheet.name()) {
            debug!(sheet = %sheet.name(), "工作表被过滤");
            continue;
        }
        selected.push(SelectedSheet { index, sheet });
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SheetVisibility;
    use crate::importer::error::ErrorKind;

    fn names<'w>(selected: &[SelectedSheet<'w>]) -> Vec<&'w str> {
        selected.iter().map(|s| s.name()).collect()
    }

    fn four_tables() -> Workbook {
        Workbook::new()
            .with_sheet(Sheet::new("table_11"))
            .with_sheet(Sheet::new("table_12"))
            .with_sheet(Sheet::new("table_21"))
            .with_sheet(Sheet::new("table_22"))
    }

    #[test]
    fn test_include_full_match() {
        let filter = SheetFilter::compile([".+2$"], Vec::<String>::new()).unwrap();
        let wb = four_tables();
        let selected = select_sheets(&wb, &filter);
        assert_eq!(names(&selected), vec!["table_12", "table_22"]);
        assert_eq!(selected[1].index, 3);
        assert!(std::ptr::eq(selected[1].sheet, &wb.sheets()[3]));
    }

    #[test]
    fn test_patterns_are_not_substring_search() {
        let filter = SheetFilter::compile(["table_1"], Vec::<String>::new()).unwrap();
        assert!(select_sheets(&four_tables(), &filter).is_empty());
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter = SheetFilter::compile(["table_1.", "table_21"], ["table_12", "table_2."]).unwrap();
        let wb = four_tables();
        let selected = select_sheets(&wb, &filter);
        assert_eq!(names(&selected), vec!["table_11"]);
    }

    #[test]
    fn test_hidden_sheets_never_selected() {
        let wb = Workbook::new()
            .with_sheet(Sheet::new("a"))
            .with_sheet(Sheet::new("b").with_visibility(SheetVisibility::Hidden))
            .with_sheet(Sheet::new("c").with_visibility(SheetVisibility::VeryHidden));
        let filter = SheetFilter::compile(["b", "c", "a"], Vec::<String>::new()).unwrap();
        assert_eq!(names(&select_sheets(&wb, &filter)), vec!["a"]);
    }

    #[test]
    fn test_workbook_order_is_kept() {
        let wb = Workbook::new()
            .with_sheet(Sheet::new("z"))
            .with_sheet(Sheet::new("a"));
        let filter = SheetFilter::default();
        assert_eq!(names(&select_sheets(&wb, &filter)), vec!["z", "a"]);
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let err = SheetFilter::compile(Vec::<String>::new(), ["(unclosed"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert!(err.to_string().contains("exclude"));
    }
}
