// ==========================================
// 合同登记转换 - 应用层
// ==========================================
// 职责: 一次性批处理编排（加载 → 投影 → 输出）
// ==========================================

pub mod error;
pub mod pipeline;

pub use error::{AppError, AppResult};
pub use pipeline::Pipeline;
