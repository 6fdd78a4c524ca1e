use anyhow::Result;
use clap::Parser;
use wiki_quiz::utils::logging;
use wiki_quiz::{App, Cli, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 读取 .env（不存在时忽略）
    let _ = dotenvy::dotenv();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run(cli.command).await?;

    Ok(())
}
