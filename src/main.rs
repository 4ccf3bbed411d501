// ==========================================
// 合同登记转换 - 命令行入口
// ==========================================
// 退出码: 0 成功（打印输出文件路径）/ 1 任一错误
// ==========================================

use clap::Parser;
use rendicion_xml::{logging, AppError, CliArgs, Pipeline, RunConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    eprintln!("Use --help to see the available options");
    let args = CliArgs::parse();

    match run(args).await {
        Ok(path) => {
            println!("Success! You can open your file in {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "转换失败");
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(args: CliArgs) -> Result<PathBuf, AppError> {
    let config = RunConfig::from_args(args)?;

    tracing::info!("==================================================");
    tracing::info!("{} v{}", rendicion_xml::APP_NAME, rendicion_xml::VERSION);
    tracing::info!(config = %config.snapshot(), "运行配置");
    tracing::info!(input = %config.input_file().display(), "源工作簿");
    tracing::info!("==================================================");

    Pipeline::new(config).run().await
}
