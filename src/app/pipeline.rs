// ==========================================
// 合同登记转换 - 一次性转换流程
// ==========================================
// 流程:
// 1. 加载四张表（并发, 闸门汇合）
// 2. 合同投影
// 3. XML 输出落盘
// 失败: 任一步骤出错即返回, 不写出部分结果
// ==========================================

use crate::app::error::AppResult;
use crate::config::RunConfig;
use crate::domain::contract::ContratoRecord;
use crate::engine::projector::ContractProjector;
use crate::export::xml_emitter::XmlEmitter;
use crate::importer::loader_trait::TableLoader;
use crate::importer::table_loader::WorkbookTableLoader;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct Pipeline {
    config: RunConfig,
    loader: Arc<dyn TableLoader>,
    projector: ContractProjector,
    emitter: XmlEmitter,
}

impl Pipeline {
    /// 按运行配置组装默认组件
    pub fn new(config: RunConfig) -> Self {
        let loader = Arc::new(WorkbookTableLoader::with_delimiter(config.delimiter_byte()));
        Self::with_loader(config, loader)
    }

    /// 注入自定义加载器
    pub fn with_loader(config: RunConfig, loader: Arc<dyn TableLoader>) -> Self {
        let projector = ContractProjector::new(config.locale);
        let emitter = XmlEmitter::new(config.wrap_rules.clone());
        Self {
            config,
            loader,
            projector,
            emitter,
        }
    }

    /// 加载 + 投影（不落盘）
    pub async fn project(&self) -> AppResult<Vec<ContratoRecord>> {
        let input_file = self.config.input_file();
        let tables = self.loader.load_tables(&input_file).await?;
        info!("Done parsing!!");

        let contratos = self.projector.project(&tables);
        info!(count = contratos.len(), "合同投影完成");
        Ok(contratos)
    }

    /// 完整运行, 返回输出文件路径
    #[instrument(skip(self), fields(year = self.config.year))]
    pub async fn run(&self) -> AppResult<PathBuf> {
        let contratos = self.project().await?;

        let output_file = self.config.output_file();
        let written = self
            .emitter
            .emit(self.config.year, &contratos, &output_file)?;

        info!(path = %written.display(), "XML 已写出");
        Ok(written)
    }
}
