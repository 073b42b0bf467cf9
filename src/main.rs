use anyhow::Result;
use ham_question_pool::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置，命令行参数覆盖题目 ID
    let config = Config::load()?.with_question_ids(std::env::args().skip(1));

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
