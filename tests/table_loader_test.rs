// ==========================================
// 合同登记转换 - 工作簿加载集成测试
// ==========================================


use rendicion_xml::importer::{TableLoader, WorkbookTableLoader};
use rendicion_xml::{CellValue, NumberLocale, Pipeline, TableKey};
use test_helpers::*;

#[tokio::test]
async fn test_load_tables_types_values() {
    let (temp_dir, _config) = prepare_run(&sample_sheets());

    let tables = WorkbookTableLoader::default()
        .load_tables(&workbook_path(&temp_dir))
        .await
        .unwrap();

    for key in TableKey::ALL {
        assert_eq!(tables.table(key).len(), 1, "表 {} 行数不符", key);
    }

    let contrato = &tables.contratos.rows()[0];
    assert_eq!(contrato.get("RefContrato"), &CellValue::from("C1"));
    assert_eq!(contrato.get("ValorEstimado"), &CellValue::Number(1234.5));
    assert_eq!(contrato.get("Objeto"), &CellValue::from("Reforma; fase 1"));
    assert_eq!(contrato.get("PlazoEjecucionMeses"), &CellValue::Absent);

    let adjudicatario = &tables.adjudicatarios.rows()[0];
    assert_eq!(adjudicatario.get("Ute"), &CellValue::Bool(true));
    assert_eq!(adjudicatario.get("Extranjero"), &CellValue::Bool(false));
}

#[tokio::test]
async fn test_blank_rows_are_skipped() {
    let sheets = vec![
        contratos_sheet()
            .row(vec![Cell::Text("C1")])
            .row(vec![Cell::Empty, Cell::Empty])
            .row(vec![Cell::Text("C2")]),
        adjudicatarios_sheet(),
        utes_sheet(),
        presupuestarias_sheet(),
    ];
    let (temp_dir, _config) = prepare_run(&sheets);

    let tables = WorkbookTableLoader::default()
        .load_tables(&workbook_path(&temp_dir))
        .await
        .unwrap();

    assert_eq!(tables.contratos.len(), 2);
    assert!(tables.utes.is_empty());
}

#[tokio::test]
async fn test_custom_delimiter_preserves_cells() {
    let (temp_dir, _config) = prepare_run(&sample_sheets());

    let tables = WorkbookTableLoader::with_delimiter(b'|')
        .load_tables(&workbook_path(&temp_dir))
        .await
        .unwrap();

    let contrato = &tables.contratos.rows()[0];
    assert_eq!(contrato.get("Objeto"), &CellValue::from("Reforma; fase 1"));
    assert_eq!(tables.utes.rows()[0].get("CIF Adjudicatario"), &CellValue::from("A1"));
}

#[tokio::test]
async fn test_project_with_spanish_locale() {
    let (_temp_dir, mut config) = prepare_run(&sample_sheets());
    config.locale = NumberLocale::Es;

    let contratos = Pipeline::new(config).project().await.unwrap();

    assert_eq!(contratos.len(), 1);
    assert_eq!(contratos[0].valor_estimado.as_deref(), Some("1234,5"));
    assert_eq!(
        contratos[0].aplicaciones_presupuestarias[0].importe.as_deref(),
        Some("2.500.000")
    );
    let entidades = contratos[0].adjudicatarios[0].entidades.as_ref().unwrap();
    assert_eq!(entidades[0].nombre.as_deref(), Some("Construcciones SA"));
}
