// ==========================================
// Sheet Seed - 导入配置构建器
// ==========================================
// 两阶段:
//   ImportBuilder（可变，逐项校验）--build()--> ImportPlan（不可变）
// build() 之后构建器进入 Built 状态，任何调用都返回 AlreadyBuilt
// 所有校验在打开工作簿之前完成
// ==========================================

use crate::config::resource_locator::ResourceLocator;
use crate::domain::cell::Value;
use crate::domain::operation::Operation;
use crate::domain::types::Margin;
use crate::domain::workbook::Workbook;
use crate::generator::{GeneratorHandle, ValueGenerator};
use crate::importer::error::{SeedError, SeedResult};
use crate::importer::import_trait::{IdentityResolver, TableNameResolver};
use crate::importer::operation_assembler::{DefaultValues, ValueGenerators};
use crate::importer::sheet_selector::SheetFilter;
use crate::importer::spreadsheet_importer::SpreadsheetImporter;
use crate::repository::insert_executor::{ExecutionSummary, InsertExecutor};
use regex::Regex;
use rusqlite::Connection;
use std::fmt;
use std::mem;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// ImportBuilder
// ==========================================
pub struct ImportBuilder {
    state: BuilderState,
}

enum BuilderState {
    Configuring(Box<PendingConfig>),
    Built,
}

struct PendingConfig {
    location: PathBuf,
    left: u32,
    top: u32,
    skip_after_header: u32,
    include: Vec<String>,
    exclude: Vec<String>,
    resolver: Box<dyn TableNameResolver>,
    default_values: DefaultValues,
    value_generators: ValueGenerators,
}

impl ImportBuilder {
    /// 以默认资源定位器解析工作簿位置
    ///
    /// # 返回
    /// - Err(ResourceNotFound): 找不到工作簿文件
    pub fn excel(location: &str) -> SeedResult<Self> {
        Self::excel_with(&ResourceLocator::from_env(), location)
    }

    /// 使用指定的资源定位器解析工作簿位置
    pub fn excel_with(locator: &ResourceLocator, location: &str) -> SeedResult<Self> {
        let path = locator.resolve(location)?;
        debug!(location, path = %path.display(), "工作簿位置解析完成");
        Ok(Self::from_path(path))
    }

    /// 直接使用已知路径（不做存在性检查）
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            state: BuilderState::Configuring(Box::new(PendingConfig {
                location: path.into(),
                left: 0,
                top: 0,
                skip_after_header: 0,
                include: Vec::new(),
                exclude: Vec::new(),
                resolver: Box::new(IdentityResolver),
                default_values: DefaultValues::new(),
                value_generators: ValueGenerators::new(),
            })),
        }
    }

    fn config_mut(&mut self) -> SeedResult<&mut PendingConfig> {
        match &mut self.state {
            BuilderState::Configuring(config) => Ok(config),
            BuilderState::Built => Err(SeedError::AlreadyBuilt),
        }
    }

    pub fn is_built(&self) -> bool {
        matches!(self.state, BuilderState::Built)
    }

    /// 数据起始列（0 基，默认 0）
    pub fn left(&mut self, left: i64) -> SeedResult<&mut Self> {
        let left = non_negative("left", left)?;
        self.config_mut()?.left = left;
        Ok(self)
    }

    /// 表头所在行（0 基，默认 0）
    pub fn top(&mut self, top: i64) -> SeedResult<&mut Self> {
        let top = non_negative("top", top)?;
        self.config_mut()?.top = top;
        Ok(self)
    }

    pub fn margin(&mut self, left: i64, top: i64) -> SeedResult<&mut Self> {
        self.left(left)?.top(top)
    }

    /// 表头与第一行数据之间跳过的行数（默认 0）
    pub fn skip_after_header(&mut self, rows: i64) -> SeedResult<&mut Self> {
        let rows = non_negative("skip_after_header", rows)?;
        self.config_mut()?.skip_after_header = rows;
        Ok(self)
    }

    /// 追加 include 模式（整串匹配的正则）
    pub fn include<I, S>(&mut self, patterns: I) -> SeedResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config_mut()?
            .include
            .extend(patterns.into_iter().map(Into::into));
        Ok(self)
    }

    /// 追加 exclude 模式（整串匹配的正则；与 include 同时匹配时 exclude 优先）
    pub fn exclude<I, S>(&mut self, patterns: I) -> SeedResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config_mut()?
            .exclude
            .extend(patterns.into_iter().map(Into::into));
        Ok(self)
    }

    /// 追加已编译的 include 正则
    ///
    /// 只取模式文本，构建时与字符串模式一样按整串匹配；
    /// RegexBuilder 上设置的选项不保留，需要时用内联标志（如 `(?i)`）
    pub fn include_regex<I>(&mut self, patterns: I) -> SeedResult<&mut Self>
    where
        I: IntoIterator<Item = Regex>,
    {
        self.include(patterns.into_iter().map(|re| re.as_str().to_string()))
    }

    /// 追加已编译的 exclude 正则（语义同 include_regex）
    pub fn exclude_regex<I>(&mut self, patterns: I) -> SeedResult<&mut Self>
    where
        I: IntoIterator<Item = Regex>,
    {
        self.exclude(patterns.into_iter().map(|re| re.as_str().to_string()))
    }

    /// 工作表名 → 表名（默认表名 = 工作表名）
    pub fn resolver<R: TableNameResolver + 'static>(&mut self, resolver: R) -> SeedResult<&mut Self> {
        self.config_mut()?.resolver = Box::new(resolver);
        Ok(self)
    }

    /// 为 (表, 列) 指定默认值；Value::Null 表示显式写入 NULL
    pub fn with_default_value(
        &mut self,
        table: &str,
        column: &str,
        value: impl Into<Value>,
    ) -> SeedResult<&mut Self> {
        require_name("table", table)?;
        require_name("column", column)?;
        self.config_mut()?
            .default_values
            .entry(table.to_string())
            .or_default()
            .insert(column.to_string(), value.into());
        Ok(self)
    }

    /// 为 (表, 列) 指定值生成器
    pub fn with_generated_value<G: ValueGenerator + 'static>(
        &mut self,
        table: &str,
        column: &str,
        generator: G,
    ) -> SeedResult<&mut Self> {
        self.with_generator_handle(table, column, GeneratorHandle::new(generator))
    }

    /// 为 (表, 列) 指定共享的值生成器句柄
    pub fn with_generator_handle(
        &mut self,
        table: &str,
        column: &str,
        generator: GeneratorHandle,
    ) -> SeedResult<&mut Self> {
        require_name("table", table)?;
        require_name("column", column)?;
        self.config_mut()?
            .value_generators
            .entry(table.to_string())
            .or_default()
            .insert(column.to_string(), generator);
        Ok(self)
    }

    /// 生成不可变的导入计划
    ///
    /// # 返回
    /// - Err(InvalidConfiguration): include/exclude 正则无效（构建器保持可用）
    /// - Err(AlreadyBuilt): 构建器已被使用
    pub fn build(&mut self) -> SeedResult<ImportPlan> {
        let filter = {
            let config = self.config_mut()?;
            SheetFilter::compile(&config.include, &config.exclude)?
        };

        let config = match mem::replace(&mut self.state, BuilderState::Built) {
            BuilderState::Configuring(config) => *config,
            BuilderState::Built => return Err(SeedError::AlreadyBuilt),
        };

        let plan = ImportPlan {
            location: config.location,
            margin: Margin::new(config.left, config.top),
            skip_after_header: config.skip_after_header,
            filter,
            resolver: config.resolver,
            default_values: config.default_values,
            value_generators: config.value_generators,
        };
        info!(
            location = %plan.location.display(),
            left = plan.margin.left,
            top = plan.margin.top,
            skip_after_header = plan.skip_after_header,
            "导入计划构建完成"
        );
        Ok(plan)
    }
}

impl fmt::Debug for ImportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            BuilderState::Configuring(config) => f
                .debug_struct("ImportBuilder")
                .field("location", &config.location)
                .field("left", &config.left)
                .field("top", &config.top)
                .field("skip_after_header", &config.skip_after_header)
                .field("include", &config.include)
                .field("exclude", &config.exclude)
                .finish_non_exhaustive(),
            BuilderState::Built => f.write_str("ImportBuilder(built)"),
        }
    }
}

fn non_negative(parameter: &str, value: i64) -> SeedResult<u32> {
    if value < 0 {
        return Err(SeedError::invalid_config(parameter, "必须大于等于 0"));
    }
    u32::try_from(value).map_err(|_| SeedError::invalid_config(parameter, format!("超出范围: {}", value)))
}

fn require_name(parameter: &str, value: &str) -> SeedResult<()> {
    if value.is_empty() {
        return Err(SeedError::invalid_config(parameter, "不能为空"));
    }
    Ok(())
}

// ==========================================
// ImportPlan - 不可变导入计划
// ==========================================
pub struct ImportPlan {
    location: PathBuf,
    margin: Margin,
    skip_after_header: u32,
    filter: SheetFilter,
    resolver: Box<dyn TableNameResolver>,
    default_values: DefaultValues,
    value_generators: ValueGenerators,
}

impl ImportPlan {
    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn skip_after_header(&self) -> u32 {
        self.skip_after_header
    }

    pub fn filter(&self) -> &SheetFilter {
        &self.filter
    }

    pub fn resolver(&self) -> &dyn TableNameResolver {
        self.resolver.as_ref()
    }

    pub fn default_values(&self) -> &DefaultValues {
        &self.default_values
    }

    pub fn value_generators(&self) -> &ValueGenerators {
        &self.value_generators
    }

    /// 读取工作簿，生成有序的插入操作序列
    pub fn operations(&self) -> SeedResult<Vec<Operation>> {
        SpreadsheetImporter::new(self).import()
    }

    /// 对已加载的工作簿生成操作序列
    pub fn operations_from(&self, workbook: &Workbook) -> SeedResult<Vec<Operation>> {
        SpreadsheetImporter::new(self).transform(workbook)
    }

    /// 转换并在一个事务中执行全部操作
    pub fn launch(&self, conn: &mut Connection) -> SeedResult<ExecutionSummary> {
        let operations = self.operations()?;
        Ok(InsertExecutor::execute(conn, &operations)?)
    }
}

impl fmt::Debug for ImportPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportPlan")
            .field("location", &self.location)
            .field("margin", &self.margin)
            .field("skip_after_header", &self.skip_after_header)
            .field("filter", &self.filter)
            .field("default_values", &self.default_values)
            .field("value_generators", &self.value_generators)
            .finish_non_exhaustive()
    }
}
