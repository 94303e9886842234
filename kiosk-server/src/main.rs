use kiosk_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境 (dotenv, 日志) 和配置
    let config = setup_environment()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Kiosk order server starting..."
    );

    // 2. 初始化服务器状态 (账本)
    let state = ServerState::initialize(&config)?;

    // 3. 启动 HTTP 服务器
    if let Err(e) = Server::new(config, state).run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
