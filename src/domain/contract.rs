// ==========================================
// 合同登记转换 - 输出记录
// ==========================================
// 职责: 投影后的合同 / 中标人 / 联合体成员 / 预算科目
// 字段顺序即 XML 子元素顺序
// ==========================================

use serde::Serialize;

/// 投影后的合同
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContratoRecord {
    pub ref_contrato: Option<String>,
    pub fecha_adjudicacion: Option<String>,
    pub fecha_formalizacion: Option<String>,
    pub desc_tipo_contrato: Option<String>,
    pub desc_forma_tramitacion: Option<String>,
    pub desc_legislacion_aplicable: Option<String>,
    pub desc_proc_adjudicacion: Option<String>,
    pub sara: Option<String>,
    pub valor_estimado: Option<String>,
    pub num_lotes: Option<String>,
    pub objeto: Option<String>,
    pub importe_adjudicacion: Option<String>,
    pub impuestos: Option<String>,
    pub presupuesto_licitacion: Option<String>,
    pub plazo_ejecucion_meses: Option<String>,
    pub adjudicatarios: Vec<AdjudicatarioRecord>,
    pub aplicaciones_presupuestarias: Vec<AplicacionPresupuestariaRecord>,
}

/// 投影后的中标人
///
/// `entidades` 仅在 Ute 为真时存在; 为 None 时不输出 Entidades 元素
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdjudicatarioRecord {
    pub extranjero: Option<String>,
    pub cif: Option<String>,
    pub nombre: Option<String>,
    pub ute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entidades: Option<Vec<EntidadRecord>>,
}

/// 联合体成员
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntidadRecord {
    pub extranjero: Option<String>,
    pub cif: Option<String>,
    pub nombre: Option<String>,
}

/// 预算科目
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AplicacionPresupuestariaRecord {
    pub descripcion: Option<String>,
    pub importe: Option<String>,
}
