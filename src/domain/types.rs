// ==========================================
// 合同登记转换 - 领域类型定义
// ==========================================
// 职责: 单元格取值、工作表键
// ==========================================

use std::fmt;

// ==========================================
// 单元格取值 (Cell Value)
// ==========================================
// 工作表无固定 schema,字段值为变体类型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Absent,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// 原样输出的文本形式（Absent → None）
    pub fn render(&self) -> Option<String> {
        match self {
            CellValue::Absent => None,
            other => Some(other.to_string()),
        }
    }

    /// 真值判定
    ///
    /// 非空文本一律为真（含 "NO" / "N"）; "0"/"false" 已在导入时推断为数值/布尔
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Absent => false,
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Text(s) => !s.trim().is_empty(),
        }
    }

    /// 关联键比较: 同类型按值比较, Absent 永不匹配
    pub fn join_key(&self) -> Option<JoinKey> {
        match self {
            CellValue::Absent => None,
            CellValue::Text(s) => Some(JoinKey::Text(s.clone())),
            // -0.0 与 0.0 归一
            CellValue::Number(n) if !n.is_nan() => Some(JoinKey::Number((n + 0.0).to_bits())),
            CellValue::Number(_) => None,
            CellValue::Bool(b) => Some(JoinKey::Bool(*b)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Absent => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

// ==========================================
// 关联键 (Join Key)
// ==========================================
// 可哈希的键形式,用于按 RefContrato / CIF 建索引
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JoinKey {
    Text(String),
    Number(u64),
    Bool(bool),
}

// ==========================================
// 工作表键 (Table Key)
// ==========================================
// 固定四张表,工作表名小写后与之匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKey {
    Contratos,
    Adjudicatarios,
    Utes,
    Presupuestarias,
}

impl TableKey {
    pub const ALL: [TableKey; 4] = [
        TableKey::Contratos,
        TableKey::Adjudicatarios,
        TableKey::Utes,
        TableKey::Presupuestarias,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKey::Contratos => "contratos",
            TableKey::Adjudicatarios => "adjudicatarios",
            TableKey::Utes => "utes",
            TableKey::Presupuestarias => "presupuestarias",
        }
    }

    /// 按工作表名匹配（去空白、小写）
    pub fn from_sheet_name(sheet_name: &str) -> Option<TableKey> {
        let lower = sheet_name.trim().to_lowercase();
        TableKey::ALL.into_iter().find(|key| key.as_str() == lower)
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
