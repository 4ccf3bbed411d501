// ==========================================
// 合同登记转换 - XML 输出器
// ==========================================
// 职责: 合同记录 → <Rendicion ejercicio="..."> 文档 → 落盘
// 工具: quick-xml Writer（4 空格缩进, 属性双引号）
// ==========================================

use crate::domain::contract::ContratoRecord;
use crate::export::error::{ExportError, ExportResult};
use crate::export::node::XmlNode;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ROOT_ELEMENT: &str = "Rendicion";
pub const YEAR_ATTRIBUTE: &str = "ejercicio";
pub const CONTRATO_ELEMENT: &str = "Contrato";

const INDENT_SIZE: usize = 4;

// ==========================================
// WrapRules - 列表包装规则（复数 → 单数）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrapRules {
    rules: BTreeMap<String, String>,
}

impl WrapRules {
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    pub fn with_rule(mut self, plural: impl Into<String>, singular: impl Into<String>) -> Self {
        self.rules.insert(plural.into(), singular.into());
        self
    }

    pub fn singular(&self, plural: &str) -> Option<&str> {
        self.rules.get(plural).map(String::as_str)
    }
}

impl Default for WrapRules {
    fn default() -> Self {
        Self::empty()
            .with_rule("Adjudicatarios", "Adjudicatario")
            .with_rule("Entidades", "Entidad")
            .with_rule("AplicacionesPresupuestarias", "AplicacionPresupuestaria")
    }
}

// ==========================================
// XmlEmitter
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct XmlEmitter {
    wrap_rules: WrapRules,
}

impl XmlEmitter {
    pub fn new(wrap_rules: WrapRules) -> Self {
        Self { wrap_rules }
    }

    /// 生成完整 XML 文档文本
    pub fn render(&self, year: u32, contratos: &[ContratoRecord]) -> ExportResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let year = year.to_string();
        let mut root = BytesStart::new(ROOT_ELEMENT);
        root.push_attribute((YEAR_ATTRIBUTE, year.as_str()));
        writer.write_event(Event::Start(root))?;

        let nodes: Vec<XmlNode> = contratos.iter().map(XmlNode::from).collect();
        self.write_field(&mut writer, CONTRATO_ELEMENT, &XmlNode::List(nodes))?;

        writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

        Ok(String::from_utf8(writer.into_inner())?)
    }

    /// 生成并写入 <output_dir>/<file_name>, 目录不存在时创建
    pub fn emit(
        &self,
        year: u32,
        contratos: &[ContratoRecord],
        output_file: &Path,
    ) -> ExportResult<PathBuf> {
        let xml = self.render(year, contratos)?;
        debug!(bytes = xml.len(), "XML 文档已生成");

        if let Some(dir) = output_file.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                info!(dir = %dir.display(), "创建输出目录");
                fs::create_dir_all(dir).map_err(|e| ExportError::CreateDirError {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                })?;
            }
        }

        fs::write(output_file, xml).map_err(|e| ExportError::FileWriteError {
            path: output_file.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(output_file.to_path_buf())
    }

    fn write_field<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
        name: &str,
        node: &XmlNode,
    ) -> ExportResult<()> {
        match node {
            XmlNode::Value(Some(text)) => {
                writer.write_event(Event::Start(BytesStart::new(name)))?;
                let text = xml_safe(text);
                writer.write_event(Event::Text(BytesText::new(&text)))?;
                writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            XmlNode::Value(None) => {
                writer.write_event(Event::Empty(BytesStart::new(name)))?;
            }
            XmlNode::Record(fields) if fields.is_empty() => {
                writer.write_event(Event::Empty(BytesStart::new(name)))?;
            }
            XmlNode::Record(fields) => {
                writer.write_event(Event::Start(BytesStart::new(name)))?;
                for (child, value) in fields {
                    self.write_field(writer, child, value)?;
                }
                writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
            XmlNode::List(items) => match self.wrap_rules.singular(name) {
                Some(_) if items.is_empty() => {
                    writer.write_event(Event::Empty(BytesStart::new(name)))?;
                }
                Some(singular) => {
                    writer.write_event(Event::Start(BytesStart::new(name)))?;
                    for item in items {
                        self.write_field(writer, singular, item)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(name)))?;
                }
                None => {
                    for item in items {
                        self.write_field(writer, name, item)?;
                    }
                }
            },
        }
        Ok(())
    }
}

/// XML 1.0 允许的字符
fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// 去除 XML 1.0 不允许的字符（C0 控制符、U+FFFE/U+FFFF）
fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|ch| is_xml_char(*ch)).collect())
    }
}
