// ==========================================
// 合同登记转换 - 输出模块错误类型
// ==========================================

use thiserror::Error;

/// 输出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("XML 生成失败: {0}")]
    XmlWriteError(String),

    #[error("XML 编码失败: {0}")]
    EncodingError(String),

    #[error("输出目录创建失败 ({path}): {message}")]
    CreateDirError { path: String, message: String },

    #[error("文件写入失败 ({path}): {message}")]
    FileWriteError { path: String, message: String },
}

// 实现 From<quick_xml::Error>
impl From<quick_xml::Error> for ExportError {
    fn from(err: quick_xml::Error) -> Self {
        ExportError::XmlWriteError(err.to_string())
    }
}

// 实现 From<std::string::FromUtf8Error>
impl From<std::string::FromUtf8Error> for ExportError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ExportError::EncodingError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
