// ==========================================
// 合同登记转换 - 应用层错误类型
// ==========================================
// 职责: 汇总各层错误; 任一错误均终止本次运行（退出码 1）
// ==========================================

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("输出失败: {0}")]
    Export(#[from] ExportError),
}

impl AppError {
    /// 进程退出码
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
