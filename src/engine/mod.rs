// ==========================================
// 合同登记转换 - 引擎层
// ==========================================
// 职责: 行表关联与投影、区域数字格式化
// 红线: 纯计算, 不做文件 I/O
// ==========================================

pub mod number_format;
pub mod projector;

// 重导出核心引擎
pub use number_format::NumberLocale;
pub use projector::{fields, ContractProjector};
