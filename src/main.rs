use anyhow::Result;

use take_test_submit::orchestrator::App;
use take_test_submit::utils::logging;
use take_test_submit::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
