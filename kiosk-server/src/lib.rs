//! Kiosk order server
//!
//! Receives carts from the kiosk order forms and appends one ledger row per
//! line item to the kiosk's sheet.
//!
//! # 模块结构
//!
//! ```text
//! kiosk-server/src/
//! ├── core/     # 配置、状态、启动
//! ├── api/      # HTTP 路由和处理器
//! ├── kiosk/    # kiosk 配置、行格式、订单提交
//! ├── ledger/   # 账本 (Google Sheets / 内存)
//! └── utils/    # 日志
//! ```

pub mod api;
pub mod core;
pub mod kiosk;
pub mod ledger;
pub mod utils;

pub use api::build_app;
pub use crate::core::{Config, LedgerBackend, Server, ServerError, ServerState};
pub use kiosk::{KioskProfile, SubmitError, SubmitOutcome, submit_order};
pub use ledger::{Clock, FixedClock, LedgerError, LedgerRow, LedgerSink, MemoryLedger, SystemClock};
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Load `.env` and initialize logging from the environment
///
/// Returns the loaded configuration.
pub fn setup_environment() -> anyhow::Result<Config> {
    // A missing .env file is fine; the environment is used as-is
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        &config.log_level,
        config.log_json || config.is_production(),
        config.log_dir.as_deref(),
    )?;

    Ok(config)
}
