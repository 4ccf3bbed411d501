// ==========================================
// 合同登记转换 - 合同投影引擎
// ==========================================
// 职责: 合同行 + 关联中标人 / 联合体成员 / 预算科目 → 嵌套输出记录
// 输入: TableSet（四表只读快照）
// 输出: Vec<ContratoRecord>（与合同表行一一对应, 保持输入顺序）
// ==========================================
// 关联: 按 RefContrato / CIF Adjudicatario 建哈希索引,
//       无匹配时得到空集合, 不视为错误
// ==========================================

use crate::domain::contract::{
    AdjudicatarioRecord, AplicacionPresupuestariaRecord, ContratoRecord, EntidadRecord,
};
use crate::domain::table::{RowRecord, Table, TableSet};
use crate::domain::types::{CellValue, JoinKey};
use crate::engine::number_format::NumberLocale;
use std::collections::HashMap;
use tracing::instrument;

/// 源表字段名
pub mod fields {
    pub const REF_CONTRATO: &str = "RefContrato";
    pub const FECHA_ADJUDICACION: &str = "FechaAdjudicacion";
    pub const FECHA_FORMALIZACION: &str = "FechaFormalizacion";
    pub const DESC_TIPO_CONTRATO: &str = "DescTipoContrato";
    pub const DESC_FORMA_TRAMITACION: &str = "DescFormaTramitacion";
    pub const DESC_LEGISLACION_APLICABLE: &str = "DescLegislacionAplicable";
    pub const DESC_PROC_ADJUDICACION: &str = "DescProcAdjudicacion";
    pub const SARA: &str = "Sara";
    pub const VALOR_ESTIMADO: &str = "ValorEstimado";
    pub const NUM_LOTES: &str = "NumLotes";
    pub const OBJETO: &str = "Objeto";
    pub const IMPORTE_ADJUDICACION: &str = "ImporteAdjudicacion";
    pub const IMPUESTOS: &str = "Impuestos";
    pub const PRESUPUESTO_LICITACION: &str = "PresupuestoLicitacion";
    pub const PLAZO_EJECUCION_MESES: &str = "PlazoEjecucionMeses";

    pub const EXTRANJERO: &str = "Extranjero";
    pub const CIF: &str = "Cif";
    pub const NOMBRE: &str = "Nombre";
    pub const UTE: &str = "Ute";
    pub const CIF_ADJUDICATARIO: &str = "CIF Adjudicatario";

    pub const DESCRIPCION: &str = "Descripcion";
    pub const IMPORTE: &str = "Importe";
}

// ==========================================
// RowIndex - 按关联键分组的行引用
// ==========================================
struct RowIndex<'a> {
    groups: HashMap<JoinKey, Vec<&'a RowRecord>>,
}

impl<'a> RowIndex<'a> {
    /// 建索引, 组内保持输入顺序
    fn build(table: &'a Table, key_field: &str) -> Self {
        let mut groups: HashMap<JoinKey, Vec<&'a RowRecord>> = HashMap::new();
        for row in table.rows() {
            if let Some(key) = row.get(key_field).join_key() {
                groups.entry(key).or_default().push(row);
            }
        }
        Self { groups }
    }

    fn lookup(&self, value: &CellValue) -> &[&'a RowRecord] {
        value
            .join_key()
            .and_then(|key| self.groups.get(&key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ==========================================
// ContractProjector - 合同投影引擎
// ==========================================
pub struct ContractProjector {
    locale: NumberLocale,
}

impl ContractProjector {
    pub fn new(locale: NumberLocale) -> Self {
        Self { locale }
    }

    /// 投影全部合同
    #[instrument(skip(self, tables), fields(contratos = tables.contratos.len()))]
    pub fn project(&self, tables: &TableSet) -> Vec<ContratoRecord> {
        let adjudicatarios = RowIndex::build(&tables.adjudicatarios, fields::REF_CONTRATO);
        let presupuestarias = RowIndex::build(&tables.presupuestarias, fields::REF_CONTRATO);
        let utes = RowIndex::build(&tables.utes, fields::CIF_ADJUDICATARIO);

        tables
            .contratos
            .rows()
            .iter()
            .map(|contrato| {
                let reference = contrato.get(fields::REF_CONTRATO);
                let mut record = self.project_contrato(contrato);

                record.adjudicatarios = adjudicatarios
                    .lookup(reference)
                    .iter()
                    .map(|row| self.project_adjudicatario(row, &utes))
                    .collect();

                record.aplicaciones_presupuestarias = presupuestarias
                    .lookup(reference)
                    .iter()
                    .map(|row| self.project_aplicacion(row))
                    .collect();

                record
            })
            .collect()
    }

    /// 合同自身字段（不含嵌套集合）
    pub fn project_contrato(&self, row: &RowRecord) -> ContratoRecord {
        ContratoRecord {
            ref_contrato: verbatim(row, fields::REF_CONTRATO),
            fecha_adjudicacion: verbatim(row, fields::FECHA_ADJUDICACION),
            fecha_formalizacion: verbatim(row, fields::FECHA_FORMALIZACION),
            desc_tipo_contrato: verbatim(row, fields::DESC_TIPO_CONTRATO),
            desc_forma_tramitacion: verbatim(row, fields::DESC_FORMA_TRAMITACION),
            desc_legislacion_aplicable: verbatim(row, fields::DESC_LEGISLACION_APLICABLE),
            desc_proc_adjudicacion: verbatim(row, fields::DESC_PROC_ADJUDICACION),
            sara: verbatim(row, fields::SARA),
            valor_estimado: self.amount(row, fields::VALOR_ESTIMADO),
            num_lotes: verbatim(row, fields::NUM_LOTES),
            objeto: verbatim(row, fields::OBJETO),
            importe_adjudicacion: self.amount(row, fields::IMPORTE_ADJUDICACION),
            impuestos: self.amount(row, fields::IMPUESTOS),
            presupuesto_licitacion: self.amount(row, fields::PRESUPUESTO_LICITACION),
            plazo_ejecucion_meses: verbatim(row, fields::PLAZO_EJECUCION_MESES),
            adjudicatarios: Vec::new(),
            aplicaciones_presupuestarias: Vec::new(),
        }
    }

    /// 中标人; Ute 为真时附带联合体成员（可为空列表）
    fn project_adjudicatario(&self, row: &RowRecord, utes: &RowIndex<'_>) -> AdjudicatarioRecord {
        let entidades = row.get(fields::UTE).is_truthy().then(|| {
            utes.lookup(row.get(fields::CIF))
                .iter()
                .map(|entidad| EntidadRecord {
                    extranjero: verbatim(entidad, fields::EXTRANJERO),
                    cif: verbatim(entidad, fields::CIF),
                    nombre: verbatim(entidad, fields::NOMBRE),
                })
                .collect()
        });

        AdjudicatarioRecord {
            extranjero: verbatim(row, fields::EXTRANJERO),
            cif: verbatim(row, fields::CIF),
            nombre: verbatim(row, fields::NOMBRE),
            ute: verbatim(row, fields::UTE),
            entidades,
        }
    }

    fn project_aplicacion(&self, row: &RowRecord) -> AplicacionPresupuestariaRecord {
        AplicacionPresupuestariaRecord {
            descripcion: verbatim(row, fields::DESCRIPCION),
            importe: self.amount(row, fields::IMPORTE),
        }
    }

    /// 金额字段: 数值按区域格式化, 其他原样
    fn amount(&self, row: &RowRecord, field: &str) -> Option<String> {
        let value = row.get(field);
        match value.as_number() {
            Some(n) => Some(self.locale.format(n)),
            None => value.render(),
        }
    }
}

impl Default for ContractProjector {
    fn default() -> Self {
        Self::new(NumberLocale::default())
    }
}

fn verbatim(row: &RowRecord, field: &str) -> Option<String> {
    row.get(field).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> RowRecord {
        pairs.iter().cloned().collect()
    }

    fn contrato(reference: &str) -> RowRecord {
        row(&[
            (fields::REF_CONTRATO, CellValue::from(reference)),
            (fields::OBJETO, CellValue::from("Obras")),
            (fields::VALOR_ESTIMADO, CellValue::from(1234.5)),
            (fields::IMPUESTOS, CellValue::from("N/D")),
            (fields::NUM_LOTES, CellValue::from(3.0)),
        ])
    }

    fn adjudicatario(reference: &str, cif: &str, ute: CellValue) -> RowRecord {
        row(&[
            (fields::REF_CONTRATO, CellValue::from(reference)),
            (fields::EXTRANJERO, CellValue::Bool(false)),
            (fields::CIF, CellValue::from(cif)),
            (fields::NOMBRE, CellValue::from("Empresa")),
            (fields::UTE, ute),
        ])
    }

    fn miembro(cif_adjudicatario: &str, cif: &str) -> RowRecord {
        row(&[
            (fields::CIF_ADJUDICATARIO, CellValue::from(cif_adjudicatario)),
            (fields::EXTRANJERO, CellValue::Bool(false)),
            (fields::CIF, CellValue::from(cif)),
            (fields::NOMBRE, CellValue::from("Socio")),
        ])
    }

    fn presupuestaria(reference: &str, importe: CellValue) -> RowRecord {
        row(&[
            (fields::REF_CONTRATO, CellValue::from(reference)),
            (fields::DESCRIPCION, CellValue::from("Partida")),
            (fields::IMPORTE, importe),
        ])
    }

    #[test]
    fn test_one_record_per_contract_in_order() {
        let tables = TableSet {
            contratos: vec![contrato("C2"), contrato("C1"), contrato("C3")].into(),
            ..Default::default()
        };

        let records = ContractProjector::default().project(&tables);

        let refs: Vec<_> = records.iter().map(|r| r.ref_contrato.as_deref()).collect();
        assert_eq!(refs, vec![Some("C2"), Some("C1"), Some("C3")]);
    }

    #[test]
    fn test_amount_formatting_and_passthrough() {
        let projector = ContractProjector::default();
        let record = projector.project_contrato(&contrato("C1"));

        assert_eq!(record.valor_estimado.as_deref(), Some("1,234.5"));
        assert_eq!(record.impuestos.as_deref(), Some("N/D"));
        assert_eq!(record.importe_adjudicacion, None);
        // 非金额数值字段原样输出
        assert_eq!(record.num_lotes.as_deref(), Some("3"));
    }

    #[test]
    fn test_awardees_attach_only_to_their_contract() {
        let tables = TableSet {
            contratos: vec![contrato("C1"), contrato("C2")].into(),
            adjudicatarios: vec![
                adjudicatario("C1", "A1", CellValue::Absent),
                adjudicatario("C2", "B1", CellValue::Absent),
                adjudicatario("C1", "A2", CellValue::Absent),
                adjudicatario("C9", "Z1", CellValue::Absent),
            ]
            .into(),
            ..Default::default()
        };

        let records = ContractProjector::default().project(&tables);

        let c1: Vec<_> = records[0].adjudicatarios.iter().map(|a| a.cif.as_deref()).collect();
        let c2: Vec<_> = records[1].adjudicatarios.iter().map(|a| a.cif.as_deref()).collect();
        assert_eq!(c1, vec![Some("A1"), Some("A2")]);
        assert_eq!(c2, vec![Some("B1")]);
    }

    #[test]
    fn test_ute_flag_controls_entidades() {
        let tables = TableSet {
            contratos: vec![contrato("C1")].into(),
            adjudicatarios: vec![
                adjudicatario("C1", "A1", CellValue::Bool(true)),
                adjudicatario("C1", "A2", CellValue::Bool(false)),
                adjudicatario("C1", "A3", CellValue::from("SI")),
            ]
            .into(),
            utes: vec![miembro("A1", "E1"), miembro("A1", "E2"), miembro("A2", "E3")].into(),
            ..Default::default()
        };

        let records = ContractProjector::default().project(&tables);
        let awardees = &records[0].adjudicatarios;

        let entidades = awardees[0].entidades.as_ref().unwrap();
        assert_eq!(entidades.len(), 2);
        assert_eq!(entidades[1].cif.as_deref(), Some("E2"));

        // Ute 为假: 不输出 Entidades
        assert!(awardees[1].entidades.is_none());

        // Ute 为真但无成员: 空列表
        assert_eq!(awardees[2].entidades.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_ute_text_no_is_still_truthy() {
        let tables = TableSet {
            contratos: vec![contrato("C1")].into(),
            adjudicatarios: vec![
                adjudicatario("C1", "A1", CellValue::from("NO")),
                adjudicatario("C1", "A2", CellValue::from("")),
            ]
            .into(),
            ..Default::default()
        };

        let records = ContractProjector::default().project(&tables);
        let awardees = &records[0].adjudicatarios;

        // 非空文本为真: 输出空 Entidades
        assert_eq!(awardees[0].entidades.as_deref(), Some(&[][..]));
        assert!(awardees[1].entidades.is_none());
    }

    #[test]
    fn test_budget_lines_are_formatted() {
        let tables = TableSet {
            contratos: vec![contrato("C1")].into(),
            presupuestarias: vec![
                presupuestaria("C1", CellValue::from(2500000.0)),
                presupuestaria("C1", CellValue::Absent),
            ]
            .into(),
            ..Default::default()
        };

        let records = ContractProjector::new(NumberLocale::Es).project(&tables);
        let lines = &records[0].aplicaciones_presupuestarias;

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].importe.as_deref(), Some("2.500.000"));
        assert_eq!(lines[0].descripcion.as_deref(), Some("Partida"));
        assert_eq!(lines[1].importe, None);
    }

    #[test]
    fn test_numeric_reference_joins_numerically() {
        let mut c = RowRecord::new();
        c.insert(fields::REF_CONTRATO, CellValue::from(17.0));
        let tables = TableSet {
            contratos: vec![c].into(),
            presupuestarias: vec![row(&[
                (fields::REF_CONTRATO, CellValue::from(17.0)),
                (fields::IMPORTE, CellValue::from(5.0)),
            ])]
            .into(),
            ..Default::default()
        };

        let records = ContractProjector::default().project(&tables);
        assert_eq!(records[0].ref_contrato.as_deref(), Some("17"));
        assert_eq!(records[0].aplicaciones_presupuestarias.len(), 1);
    }

    #[test]
    fn test_contract_without_reference_gets_empty_collections() {
        let tables = TableSet {
            contratos: vec![RowRecord::new()].into(),
            adjudicatarios: vec![adjudicatario("C1", "A1", CellValue::Absent)].into(),
            ..Default::default()
        };

        let records = ContractProjector::default().project(&tables);
        assert_eq!(records.len(), 1);
        assert!(records[0].adjudicatarios.is_empty());
        assert!(records[0].aplicaciones_presupuestarias.is_empty());
    }
}
