// ==========================================
// 合同登记转换 - 工作簿整表加载
// ==========================================
// 流程:
// 1. 打开工作簿, 定位四张工作表
// 2. 每张表一个独立任务解析, 各自写入自己的表
// 3. 完成消息经通道汇总到 CompletionGate
// 4. 全部完成 → 返回 TableSet; 任一失败 → 立即返回错误
// ==========================================

use crate::domain::table::{Table, TableSet};
use crate::domain::types::TableKey;
use crate::importer::completion_gate::CompletionGate;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{DelimitedSheetParser, SheetData, WorkbookReader};
use crate::importer::loader_trait::{SheetParser, TableLoader};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// 单张表的完成消息
#[derive(Debug)]
struct SheetCompletion {
    key: TableKey,
    sheet_name: String,
    result: ImportResult<Table>,
}

// ==========================================
// WorkbookTableLoader
// ==========================================
pub struct WorkbookTableLoader {
    parser: Arc<dyn SheetParser>,
}

impl WorkbookTableLoader {
    pub fn new(parser: Arc<dyn SheetParser>) -> Self {
        Self { parser }
    }

    /// 使用指定分隔符的默认解析器
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self::new(Arc::new(DelimitedSheetParser::new(delimiter)))
    }

    /// 为单张工作表启动解析任务
    fn spawn_sheet(&self, sheet: SheetData, tx: mpsc::Sender<SheetCompletion>) {
        let parser = Arc::clone(&self.parser);

        tokio::task::spawn_blocking(move || {
            let SheetData {
                key,
                sheet_name,
                range,
            } = sheet;

            let mut table = Table::new();
            let parsed = parser.parse_rows(&sheet_name, &range, &mut |row| table.push(row));
            let result = parsed.map(|_| table);

            // 接收端已退出（其他表失败）时直接丢弃
            let _ = tx.blocking_send(SheetCompletion {
                key,
                sheet_name,
                result,
            });
        });
    }

    /// 并发解析全部工作表, 由 CompletionGate 汇合
    async fn parse_all(&self, sheets: Vec<SheetData>) -> ImportResult<TableSet> {
        let (tx, mut rx) = mpsc::channel::<SheetCompletion>(TableKey::ALL.len());
        for sheet in sheets {
            debug!(sheet = %sheet.sheet_name, table = %sheet.key, "开始解析工作表");
            self.spawn_sheet(sheet, tx.clone());
        }
        drop(tx);

        let mut gate = CompletionGate::default();
        let mut tables = TableSet::default();

        while let Some(completion) = rx.recv().await {
            let SheetCompletion {
                key,
                sheet_name,
                result,
            } = completion;

            let table = match result {
                Ok(table) => table,
                Err(e) => {
                    error!(sheet = %sheet_name, table = %key, error = %e, "工作表解析失败");
                    return Err(e);
                }
            };

            info!(table = %key, rows = table.len(), "Parsing {} finished", key);
            tables.set_table(key, table);

            if gate.mark_done(key) {
                return Ok(tables);
            }
        }

        Err(ImportError::LoaderChannelClosed {
            pending: gate.pending(),
        })
    }
}

impl Default for WorkbookTableLoader {
    fn default() -> Self {
        Self::new(Arc::new(DelimitedSheetParser::default()))
    }
}

#[async_trait]
impl TableLoader for WorkbookTableLoader {
    async fn load_tables(&self, workbook_path: &Path) -> ImportResult<TableSet> {
        let start = Instant::now();
        let path = workbook_path.to_path_buf();
        info!(path = %path.display(), "打开工作簿");

        // 阶段 0: 打开工作簿（阻塞 I/O）
        let sheets = tokio::task::spawn_blocking(move || WorkbookReader.open(&path)).await??;

        let tables = self.parse_all(sheets).await?;
        info!(elapsed = ?start.elapsed(), "全部工作表解析完成");
        Ok(tables)
    }
}
