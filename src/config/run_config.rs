// ==========================================
// 合同登记转换 - 运行配置
// ==========================================
// 来源: 命令行参数（均可选, 带默认值）
// 兼容: 旧版驼峰 / 缩写参数名（--inputPath / --ip 等）
// ==========================================

use crate::engine::number_format::NumberLocale;
use crate::export::xml_emitter::WrapRules;
use crate::importer::file_parser::DEFAULT_DELIMITER;
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const INPUT_PATH: &str = "./data";
    pub const INPUT_FILENAME: &str = "TCU_PRUEBA_SARA_CON LOTES";
    pub const INPUT_EXTENSION: &str = "xlsx";
    pub const OUTPUT_PATH: &str = "./result";
    pub const OUTPUT_FILENAME: &str = "result";
    pub const OUTPUT_EXTENSION: &str = "xml";
    pub const YEAR: u32 = 2016;
    pub const LOCALE: &str = "en";
    pub const DELIMITER: &str = ";";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("无效的区域设置: {0}")]
    InvalidLocale(String),

    #[error("无效的分隔符: {0:?}（需为单个 ASCII 字符）")]
    InvalidDelimiter(String),

    #[error("文件名不能为空: {0}")]
    EmptyFilename(&'static str),

    #[error("包装规则读取失败 ({path}): {message}")]
    WrapRulesError { path: String, message: String },
}

// ==========================================
// CliArgs - 命令行参数
// ==========================================
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "将合同登记工作簿转换为 Rendicion XML", long_about = None)]
pub struct CliArgs {
    /// 源工作簿所在目录
    #[arg(long = "input-path", visible_alias = "inputPath", alias = "ip", value_name = "DIR",
          default_value = defaults::INPUT_PATH)]
    pub input_path: PathBuf,

    /// 源工作簿文件名（不含扩展名, 固定 .xlsx）
    #[arg(long = "input-filename", visible_alias = "inputFilename", alias = "if", value_name = "NAME",
          default_value = defaults::INPUT_FILENAME)]
    pub input_filename: String,

    /// 输出目录（不存在时创建）
    #[arg(long = "output-path", visible_alias = "outputPath", aliases = ["ouputPath", "op"],
          value_name = "DIR", default_value = defaults::OUTPUT_PATH)]
    pub output_path: PathBuf,

    /// 输出文件名（不含扩展名, 固定 .xml）
    #[arg(long = "output-filename", visible_alias = "outputFilename", alias = "of", value_name = "NAME",
          default_value = defaults::OUTPUT_FILENAME)]
    pub output_filename: String,

    /// 根元素 ejercicio 属性（会计年度）
    #[arg(short = 'y', long, default_value_t = defaults::YEAR)]
    pub year: u32,

    /// 金额格式化区域（en / es）
    #[arg(long, default_value = defaults::LOCALE)]
    pub locale: String,

    /// 工作表转分隔文本时使用的字段分隔符
    #[arg(long, default_value = defaults::DELIMITER)]
    pub delimiter: String,

    /// 列表包装规则 JSON 文件（{"复数": "单数"}）, 替换默认规则
    #[arg(long = "wrap-rules", value_name = "FILE")]
    pub wrap_rules: Option<PathBuf>,
}

// ==========================================
// RunConfig - 校验后的运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub input_filename: String,
    pub output_path: PathBuf,
    pub output_filename: String,
    pub year: u32,
    pub locale: NumberLocale,
    pub delimiter: char,
    pub wrap_rules: WrapRules,
}

impl RunConfig {
    /// 从命令行参数构建并校验
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let locale: NumberLocale = args.locale.parse().map_err(ConfigError::InvalidLocale)?;
        let delimiter = parse_delimiter(&args.delimiter)?;

        let input_filename = args.input_filename.trim().to_string();
        if input_filename.is_empty() {
            return Err(ConfigError::EmptyFilename("input-filename"));
        }
        let output_filename = args.output_filename.trim().to_string();
        if output_filename.is_empty() {
            return Err(ConfigError::EmptyFilename("output-filename"));
        }

        let wrap_rules = match &args.wrap_rules {
            Some(path) => load_wrap_rules(path)?,
            None => WrapRules::default(),
        };

        Ok(Self {
            input_path: args.input_path,
            input_filename,
            output_path: args.output_path,
            output_filename,
            year: args.year,
            locale,
            delimiter,
            wrap_rules,
        })
    }

    /// <input_path>/<input_filename>.xlsx
    pub fn input_file(&self) -> PathBuf {
        self.input_path
            .join(format!("{}.{}", self.input_filename, defaults::INPUT_EXTENSION))
    }

    /// <output_path>/<output_filename>.xml
    pub fn output_file(&self) -> PathBuf {
        self.output_path
            .join(format!("{}.{}", self.output_filename, defaults::OUTPUT_EXTENSION))
    }

    pub fn delimiter_byte(&self) -> u8 {
        // parse_delimiter 保证为 ASCII
        self.delimiter as u8
    }

    /// 配置快照（JSON）
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(defaults::INPUT_PATH),
            input_filename: defaults::INPUT_FILENAME.to_string(),
            output_path: PathBuf::from(defaults::OUTPUT_PATH),
            output_filename: defaults::OUTPUT_FILENAME.to_string(),
            year: defaults::YEAR,
            locale: NumberLocale::default(),
            delimiter: DEFAULT_DELIMITER as char,
            wrap_rules: WrapRules::default(),
        }
    }
}

fn parse_delimiter(value: &str) -> Result<char, ConfigError> {
    let value = match value {
        "\\t" | "tab" => "\t",
        other => other,
    };

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => Ok(c),
        _ => Err(ConfigError::InvalidDelimiter(value.to_string())),
    }
}

fn load_wrap_rules(path: &Path) -> Result<WrapRules, ConfigError> {
    let wrap_err = |message: String| ConfigError::WrapRulesError {
        path: path.display().to_string(),
        message,
    };

    let raw = fs::read_to_string(path).map_err(|e| wrap_err(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| wrap_err(e.to_string()))
}
