// ==========================================
// Sheet Seed - 工作簿 → 插入操作序列
// ==========================================
// 流程: 选择工作表 → 定位表头行 → 解析表名 → 校验表头单元格
//       → 读取数据行 → 组装操作
// 失败语义: 按 工作表→行→列 的顺序遇到第一个错误即整体失败，
//           不返回部分结果
// ==========================================

use crate::config::import_builder::ImportPlan;
use crate::domain::operation::Operation;
use crate::domain::workbook::Workbook;
use crate::importer::cell_coercer::CellCoercer;
use crate::importer::error::SeedResult;
use crate::importer::header_extractor::{header_columns, locate_header};
use crate::importer::import_trait::{CachedValueEvaluator, FormulaEvaluator};
use crate::importer::operation_assembler::{assemble_operation, resolve_table_name};
use crate::importer::row_reader::read_rows;
use crate::importer::sheet_selector::select_sheets;
use crate::importer::workbook_loader::load_workbook;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// SpreadsheetImporter
// ==========================================
pub struct SpreadsheetImporter<'a> {
    plan: &'a ImportPlan,
    evaluator: Box<dyn FormulaEvaluator + 'a>,
}

impl<'a> SpreadsheetImporter<'a> {
    /// 使用工作簿缓存的公式结果
    pub fn new(plan: &'a ImportPlan) -> Self {
        Self {
            plan,
            evaluator: Box::new(CachedValueEvaluator),
        }
    }

    pub fn with_evaluator<E: FormulaEvaluator + 'a>(plan: &'a ImportPlan, evaluator: E) -> Self {
        Self {
            plan,
            evaluator: Box::new(evaluator),
        }
    }

    /// 打开计划中的工作簿并生成操作序列
    ///
    /// 工作簿快照在本函数内打开并在返回前释放
    #[instrument(skip(self), fields(run_id = tracing::field::Empty, location = %self.plan.location().display()))]
    pub fn import(&self) -> SeedResult<Vec<Operation>> {
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        info!("开始读取工作簿");
        let workbook = load_workbook(self.plan.location())?;
        self.transform(&workbook)
    }

    /// 把已加载的工作簿转换为操作序列
    ///
    /// # 返回
    /// - Ok(Vec<Operation>): 每个选中工作表一个操作，顺序与工作簿一致
    /// - Err: 第一个遇到的错误
    pub fn transform(&self, workbook: &Workbook) -> SeedResult<Vec<Operation>> {
        let plan = self.plan;
        let coercer = CellCoercer::new(self.evaluator.as_ref());
        let selected = select_sheets(workbook, plan.filter());
        debug!(total = workbook.len(), selected = selected.len(), "工作表选择完成");

        let mut operations = Vec::with_capacity(selected.len());
        for entry in selected {
            let sheet = entry.sheet;
            let header_row = locate_header(sheet, plan.margin())?;
            let table = resolve_table_name(plan.resolver(), sheet.name())?;
            let header = header_columns(sheet, &header_row, plan.margin(), &coercer)?;
            let rows = read_rows(sheet, header.len(), plan.margin(), plan.skip_after_header(), &coercer)?;

            let operation = assemble_operation(&table, header, rows, plan.default_values(), plan.value_generators());
            info!(
                sheet = %sheet.name(),
                table = %operation.table(),
                columns = operation.columns().len(),
                rows = operation.row_count(),
                "插入操作组装完成"
            );
            operations.push(operation);
        }

        info!(operations = operations.len(), "工作簿转换完成");
        Ok(operations)
    }
}
