// ==========================================
// 合同登记转换 - 导入层
// ==========================================
// 职责: 工作簿 → 四张只读行表
// 支持: Excel (.xlsx)
// ==========================================

// 模块声明
pub mod completion_gate;
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod loader_trait;
pub mod table_loader;

// 重导出核心类型
pub use completion_gate::CompletionGate;
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_parser::{DelimitedSheetParser, SheetData, WorkbookReader, DEFAULT_DELIMITER};
pub use table_loader::WorkbookTableLoader;

// 重导出 Trait 接口
pub use loader_trait::{SheetParser, TableLoader};
