// ==========================================
// 合同登记转换 - 领域模型层
// ==========================================
// 职责: 单元格取值、行记录、四表集合、投影输出记录
// 红线: 不含解析逻辑,不含输出逻辑
// ==========================================

pub mod contract;
pub mod table;
pub mod types;

// 重导出核心类型
pub use contract::{AdjudicatarioRecord, AplicacionPresupuestariaRecord, ContratoRecord, EntidadRecord};
pub use table::{RowRecord, Table, TableSet};
pub use types::{CellValue, JoinKey, TableKey};
