// ==========================================
// Sheet Seed - 资源定位
// ==========================================
// 职责: 逻辑路径 → 实际文件
// 查找顺序: 绝对路径直接使用；否则依次在各根目录下查找
// 默认根目录: 当前目录 → CARGO_MANIFEST_DIR → SHEET_SEED_PATH 中的各目录
// ==========================================

use crate::importer::error::{SeedError, SeedResult};
use std::env;
use std::path::{Path, PathBuf};

/// 额外资源目录的环境变量（按平台路径分隔符拆分）
pub const RESOURCE_PATH_ENV: &str = "SHEET_SEED_PATH";

#[derive(Debug, Clone, Default)]
pub struct ResourceLocator {
    roots: Vec<PathBuf>,
}

impl ResourceLocator {
    /// 不含任何根目录的定位器（只接受绝对路径）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从环境构建默认定位器
    pub fn from_env() -> Self {
        let mut locator = Self::new();
        if let Ok(cwd) = env::current_dir() {
            locator = locator.with_root(cwd);
        }
        if let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") {
            locator = locator.with_root(manifest_dir);
        }
        if let Some(paths) = env::var_os(RESOURCE_PATH_ENV) {
            for path in env::split_paths(&paths) {
                locator = locator.with_root(path);
            }
        }
        locator
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// 解析逻辑路径
    ///
    /// # 返回
    /// - Err(ResourceNotFound): 所有根目录下都不存在
    pub fn resolve(&self, location: &str) -> SeedResult<PathBuf> {
        if location.trim().is_empty() {
            return Err(SeedError::invalid_config("location", "不能为空"));
        }

        let path = Path::new(location);
        if path.is_absolute() {
            return if path.is_file() {
                Ok(path.to_path_buf())
            } else {
                Err(SeedError::ResourceNotFound(location.to_string()))
            };
        }

        self.roots
            .iter()
            .map(|root| root.join(path))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| SeedError::ResourceNotFound(location.to_string()))
    }
}
