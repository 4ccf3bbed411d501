// ==========================================
// 合同登记转换 - 工作簿 / 工作表解析器
// ==========================================
// 阶段 0: 打开工作簿, 按工作表名归入四张表
// 阶段 1: 工作表 → 分隔文本 → 行记录（逐行推送）
// ==========================================

use crate::domain::table::RowRecord;
use crate::domain::types::TableKey;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::loader_trait::SheetParser;
use calamine::{open_workbook, Data, DataType, Range, Reader, Xlsx};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;
use tracing::{debug, warn};

/// 默认字段分隔符
pub const DEFAULT_DELIMITER: u8 = b';';

// ==========================================
// SheetData - 已定位到表键的工作表
// ==========================================
#[derive(Debug, Clone)]
pub struct SheetData {
    pub key: TableKey,
    pub sheet_name: String,
    pub range: Range<Data>,
}

// ==========================================
// WorkbookReader - 工作簿读取
// ==========================================
pub struct WorkbookReader;

impl WorkbookReader {
    /// 打开工作簿并取出四张目标工作表
    ///
    /// # 返回
    /// - Ok(Vec<SheetData>): 每个表键恰好一张工作表
    /// - Err(MissingSheet): 任一目标工作表缺失
    ///
    /// # 说明
    /// - 多余的工作表被忽略
    /// - 同一表键出现多张工作表时取第一张
    pub fn open<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<SheetData>> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)?;

        let mut sheets: Vec<SheetData> = Vec::with_capacity(TableKey::ALL.len());
        for sheet_name in workbook.sheet_names() {
            let Some(key) = TableKey::from_sheet_name(&sheet_name) else {
                debug!(sheet = %sheet_name, "忽略非目标工作表");
                continue;
            };

            if sheets.iter().any(|s| s.key == key) {
                warn!(sheet = %sheet_name, table = %key, "重复的工作表, 已忽略");
                continue;
            }

            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| ImportError::SheetParseError {
                    sheet: sheet_name.clone(),
                    message: e.to_string(),
                })?;

            sheets.push(SheetData {
                key,
                sheet_name,
                range,
            });
        }

        if let Some(missing) = TableKey::ALL
            .into_iter()
            .find(|key| !sheets.iter().any(|s| s.key == *key))
        {
            return Err(ImportError::MissingSheet(missing));
        }

        Ok(sheets)
    }
}

// ==========================================
// DelimitedSheetParser - 经分隔文本转换的工作表解析
// ==========================================
pub struct DelimitedSheetParser {
    delimiter: u8,
    cleaner: DataCleaner,
}

impl DelimitedSheetParser {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            cleaner: DataCleaner,
        }
    }

    /// 工作表 → 分隔文本（首行为表头）
    pub fn render_delimited(&self, range: &Range<Data>) -> ImportResult<String> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_writer(Vec::new());

        for row in range.rows() {
            writer.write_record(row.iter().map(render_cell))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ImportError::CsvParseError(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ImportError::CsvParseError(e.to_string()))
    }

    /// 分隔文本 → 行记录, 每解析一行推送一次
    pub fn parse_delimited(
        &self,
        text: &str,
        sink: &mut dyn FnMut(RowRecord),
    ) -> ImportResult<usize> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| self.cleaner.clean_header(h))
            .collect();

        let mut count = 0;
        for result in reader.records() {
            let record = result?;
            let mut row = RowRecord::new();

            for (col_idx, value) in record.iter().enumerate() {
                match headers.get(col_idx) {
                    Some(header) if !header.is_empty() => {
                        row.insert(header.clone(), self.cleaner.infer_value(value));
                    }
                    _ => {}
                }
            }

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }

            sink(row);
            count += 1;
        }

        Ok(count)
    }
}

impl Default for DelimitedSheetParser {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl SheetParser for DelimitedSheetParser {
    fn parse_rows(
        &self,
        sheet_name: &str,
        range: &Range<Data>,
        sink: &mut dyn FnMut(RowRecord),
    ) -> ImportResult<usize> {
        let wrap = |e: ImportError| ImportError::SheetParseError {
            sheet: sheet_name.to_string(),
            message: e.to_string(),
        };

        let text = self.render_delimited(range).map_err(wrap)?;
        self.parse_delimited(&text, sink).map_err(wrap)
    }
}

/// 单元格文本化
fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => cell
            .as_date()
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CellValue;

    fn sample_range() -> Range<Data> {
        let mut range = Range::new((0, 0), (2, 2));
        range.set_value((0, 0), Data::String("RefContrato".to_string()));
        range.set_value((0, 1), Data::String(" Importe ".to_string()));
        range.set_value((0, 2), Data::String("Descripcion".to_string()));
        range.set_value((1, 0), Data::String("C1".to_string()));
        range.set_value((1, 1), Data::Float(1234.5));
        range.set_value((1, 2), Data::String("Obras; fase 1".to_string()));
        range
    }

    #[test]
    fn test_render_delimited_quotes_delimiter() {
        let parser = DelimitedSheetParser::default();
        let text = parser.render_delimited(&sample_range()).unwrap();
        let first_line = text.lines().next().unwrap();
        assert!(first_line.starts_with("RefContrato;"));
        assert!(first_line.ends_with(";Descripcion"));
        assert!(text.contains("\"Obras; fase 1\""));
    }

    #[test]
    fn test_parse_rows_pushes_typed_records() {
        let parser = DelimitedSheetParser::default();
        let mut rows = Vec::new();
        let count = parser
            .parse_rows("presupuestarias", &sample_range(), &mut |row| rows.push(row))
            .unwrap();

        // 第三行全空, 被跳过
        assert_eq!(count, 1);
        assert_eq!(rows[0].get("RefContrato"), &CellValue::from("C1"));
        assert_eq!(rows[0].get("Importe"), &CellValue::Number(1234.5));
        assert_eq!(rows[0].get("Descripcion"), &CellValue::from("Obras; fase 1"));
    }

    #[test]
    fn test_parse_delimited_custom_delimiter() {
        let parser = DelimitedSheetParser::new(b'|');
        let mut rows = Vec::new();
        parser
            .parse_delimited("Cif|Ute\nA1|true\n", &mut |row| rows.push(row))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Ute"), &CellValue::Bool(true));
    }

    #[test]
    fn test_parse_empty_sheet() {
        let parser = DelimitedSheetParser::default();
        let range: Range<Data> = Range::empty();
        let mut rows = Vec::new();
        let count = parser.parse_rows("utes", &range, &mut |row| rows.push(row)).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_workbook_reader_file_not_found() {
        let result = WorkbookReader.open("non_existent.xlsx");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_workbook_reader_rejects_extension() {
        let temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let result = WorkbookReader.open(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
