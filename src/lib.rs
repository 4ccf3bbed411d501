// ==========================================
// 合同登记转换 - 核心库
// ==========================================
// 输入: 合同登记工作簿 (.xlsx, 四张工作表)
// 输出: Rendicion XML 文档
// 系统定位: 一次性批处理转换
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 行记录与输出记录
pub mod domain;

// 导入层 - 工作簿解析与完成闸门
pub mod importer;

// 引擎层 - 关联投影与数字格式化
pub mod engine;

// 输出层 - XML 生成
pub mod export;

// 配置层 - 命令行与运行配置
pub mod config;

// 应用层 - 批处理编排
pub mod app;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use app::{AppError, AppResult, Pipeline};
pub use config::{CliArgs, RunConfig};
pub use domain::{
    AdjudicatarioRecord, AplicacionPresupuestariaRecord, CellValue, ContratoRecord,
    EntidadRecord, RowRecord, Table, TableKey, TableSet,
};
pub use engine::{ContractProjector, NumberLocale};
pub use export::{WrapRules, XmlEmitter};
pub use importer::{CompletionGate, TableLoader, WorkbookTableLoader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "rendicion-xml";
