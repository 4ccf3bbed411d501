// ==========================================
// 合同登记转换 - 加载接口 Trait
// ==========================================
// 职责: 定义工作表解析与整表加载接口（不包含实现）
// ==========================================

use crate::domain::table::{RowRecord, TableSet};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use calamine::{Data, Range};
use std::path::Path;

// ==========================================
// TableLoader Trait
// ==========================================
// 用途: 工作簿 → 四表快照
// 实现者: WorkbookTableLoader
#[async_trait]
pub trait TableLoader: Send + Sync {
    /// 加载工作簿中的四张表
    ///
    /// # 返回
    /// - Ok(TableSet): 四张表均已解析完成
    /// - Err: 工作簿打开失败、工作表缺失、任一工作表解析失败
    async fn load_tables(&self, workbook_path: &Path) -> ImportResult<TableSet>;
}

// ==========================================
// SheetParser Trait
// ==========================================
// 用途: 单张工作表解析, 行记录逐条推送给 sink
// 实现者: DelimitedSheetParser
pub trait SheetParser: Send + Sync {
    /// # 返回
    /// - Ok(usize): 推送的行数（空白行不计）
    fn parse_rows(
        &self,
        sheet_name: &str,
        range: &Range<Data>,
        sink: &mut dyn FnMut(RowRecord),
    ) -> ImportResult<usize>;
}
