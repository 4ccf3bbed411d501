// ==========================================
// 合同登记转换 - XML 节点树
// ==========================================
// 输出记录 → 与元素名无关的有序节点树
// 列表元素名由 WrapRules 决定
// ==========================================

use crate::domain::contract::{
    AdjudicatarioRecord, AplicacionPresupuestariaRecord, ContratoRecord, EntidadRecord,
};

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// 标量; None 输出为空元素
    Value(Option<String>),
    /// 有序子字段
    Record(Vec<(String, XmlNode)>),
    /// 列表; 有包装规则时输出 <复数><单数/>...</复数>, 否则重复字段名
    List(Vec<XmlNode>),
}

/// 有序字段构建器
#[derive(Debug, Default)]
struct RecordBuilder {
    fields: Vec<(String, XmlNode)>,
}

impl RecordBuilder {
    fn value(mut self, name: &str, value: &Option<String>) -> Self {
        self.fields.push((name.to_string(), XmlNode::Value(value.clone())));
        self
    }

    fn list<'a, T: 'a>(mut self, name: &str, items: impl IntoIterator<Item = &'a T>) -> Self
    where
        XmlNode: From<&'a T>,
    {
        let nodes = items.into_iter().map(XmlNode::from).collect();
        self.fields.push((name.to_string(), XmlNode::List(nodes)));
        self
    }

    fn build(self) -> XmlNode {
        XmlNode::Record(self.fields)
    }
}

impl From<&ContratoRecord> for XmlNode {
    fn from(r: &ContratoRecord) -> Self {
        RecordBuilder::default()
            .value("RefContrato", &r.ref_contrato)
            .value("FechaAdjudicacion", &r.fecha_adjudicacion)
            .value("FechaFormalizacion", &r.fecha_formalizacion)
            .value("DescTipoContrato", &r.desc_tipo_contrato)
            .value("DescFormaTramitacion", &r.desc_forma_tramitacion)
            .value("DescLegislacionAplicable", &r.desc_legislacion_aplicable)
            .value("DescProcAdjudicacion", &r.desc_proc_adjudicacion)
            .value("Sara", &r.sara)
            .value("ValorEstimado", &r.valor_estimado)
            .value("NumLotes", &r.num_lotes)
            .value("Objeto", &r.objeto)
            .value("ImporteAdjudicacion", &r.importe_adjudicacion)
            .value("Impuestos", &r.impuestos)
            .value("PresupuestoLicitacion", &r.presupuesto_licitacion)
            .value("PlazoEjecucionMeses", &r.plazo_ejecucion_meses)
            .list("Adjudicatarios", &r.adjudicatarios)
            .list("AplicacionesPresupuestarias", &r.aplicaciones_presupuestarias)
            .build()
    }
}

impl From<&AdjudicatarioRecord> for XmlNode {
    fn from(r: &AdjudicatarioRecord) -> Self {
        let builder = RecordBuilder::default()
            .value("Extranjero", &r.extranjero)
            .value("Cif", &r.cif)
            .value("Nombre", &r.nombre)
            .value("Ute", &r.ute);

        match &r.entidades {
            Some(entidades) => builder.list("Entidades", entidades).build(),
            None => builder.build(),
        }
    }
}

impl From<&EntidadRecord> for XmlNode {
    fn from(r: &EntidadRecord) -> Self {
        RecordBuilder::default()
            .value("Extranjero", &r.extranjero)
            .value("Cif", &r.cif)
            .value("Nombre", &r.nombre)
            .build()
    }
}

impl From<&AplicacionPresupuestariaRecord> for XmlNode {
    fn from(r: &AplicacionPresupuestariaRecord) -> Self {
        RecordBuilder::default()
            .value("Descripcion", &r.descripcion)
            .value("Importe", &r.importe)
            .build()
    }
}
