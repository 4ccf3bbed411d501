// ==========================================
// 合同登记转换 - 输出层
// ==========================================
// 职责: 投影记录 → XML 文档 → 文件
// ==========================================

pub mod error;
pub mod node;
pub mod xml_emitter;

pub use error::{ExportError, ExportResult};
pub use node::XmlNode;
pub use xml_emitter::{WrapRules, XmlEmitter, CONTRATO_ELEMENT, ROOT_ELEMENT, YEAR_ATTRIBUTE};
