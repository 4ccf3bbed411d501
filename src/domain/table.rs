// ==========================================
// 合同登记转换 - 行记录与表
// ==========================================
// 职责: 无 schema 行记录、单表、四表集合
// 红线: 加载完成后只读,不在进程内全局持有
// ==========================================

use crate::domain::types::{CellValue, TableKey};

// ==========================================
// RowRecord - 单行记录
// ==========================================
// 字段名 = 表头, 保持列顺序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    fields: Vec<(String, CellValue)>,
}

static ABSENT: CellValue = CellValue::Absent;

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加字段（同名表头保留首个值）
    pub fn insert(&mut self, field: impl Into<String>, value: CellValue) {
        let field = field.into();
        if self.fields.iter().any(|(name, _)| *name == field) {
            return;
        }
        self.fields.push((field, value));
    }

    /// 读取字段, 缺失时返回 Absent
    pub fn get(&self, field: &str) -> &CellValue {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
            .unwrap_or(&ABSENT)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 全部字段为空
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_absent())
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut row = RowRecord::new();
        for (field, value) in iter {
            row.insert(field, value);
        }
        row
    }
}

// ==========================================
// Table - 单张工作表的行序列（只追加）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<RowRecord>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: RowRecord) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<RowRecord>> for Table {
    fn from(rows: Vec<RowRecord>) -> Self {
        Self { rows }
    }
}

// ==========================================
// TableSet - 一次运行的四表快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    pub contratos: Table,
    pub adjudicatarios: Table,
    pub utes: Table,
    pub presupuestarias: Table,
}

impl TableSet {
    pub fn table(&self, key: TableKey) -> &Table {
        match key {
            TableKey::Contratos => &self.contratos,
            TableKey::Adjudicatarios => &self.adjudicatarios,
            TableKey::Utes => &self.utes,
            TableKey::Presupuestarias => &self.presupuestarias,
        }
    }

    pub fn set_table(&mut self, key: TableKey, table: Table) {
        match key {
            TableKey::Contratos => self.contratos = table,
            TableKey::Adjudicatarios => self.adjudicatarios = table,
            TableKey::Utes => self.utes = table,
            TableKey::Presupuestarias => self.presupuestarias = table,
        }
    }
}
