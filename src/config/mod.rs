// ==========================================
// 合同登记转换 - 配置层
// ==========================================
// 职责: 命令行参数 → 校验后的运行配置
// ==========================================

pub mod run_config;

// 重导出核心配置
pub use run_config::{defaults, CliArgs, ConfigError, RunConfig};
