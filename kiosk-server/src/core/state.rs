use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::{Config, LedgerBackend, Result, ServerError};
use crate::ledger::{
    Clock, LedgerSink, MemoryLedger, ServiceAccountAuth, ServiceAccountKey, SheetsLedger,
    SystemClock,
};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求拿到的是同一个账本和时钟。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | ledger | Arc<dyn LedgerSink> | 订单账本 |
/// | clock | Arc<dyn Clock> | 行时间戳来源 |
/// | started_at | Instant | 启动时间 (health) |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub ledger: Arc<dyn LedgerSink>,
    pub clock: Arc<dyn Clock>,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(config: Config, ledger: Arc<dyn LedgerSink>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            ledger,
            clock,
            started_at: Instant::now(),
        }
    }

    /// 根据配置构建账本
    pub fn initialize(config: &Config) -> Result<Self> {
        let ledger = build_ledger(config)?;
        tracing::info!(backend = ledger.name(), "Ledger ready");
        Ok(Self::new(config.clone(), ledger, Arc::new(SystemClock)))
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("ledger", &self.ledger.name())
            .finish_non_exhaustive()
    }
}

fn build_ledger(config: &Config) -> Result<Arc<dyn LedgerSink>> {
    match config.ledger_backend {
        LedgerBackend::Memory => {
            if !config.is_development() {
                tracing::warn!(
                    environment = %config.environment,
                    "Using the in-memory ledger: orders are lost on restart"
                );
            }
            Ok(Arc::new(MemoryLedger::new()))
        }
        LedgerBackend::Sheets => {
            let sheet_id = config
                .sheet_id
                .clone()
                .ok_or_else(|| ServerError::Config("SHEET_ID must be set".into()))?;
            let credentials = config.credentials.as_deref().ok_or_else(|| {
                ServerError::Config("GOOGLE_APPLICATION_CREDENTIALS must be set".into())
            })?;

            let mut builder = reqwest::Client::builder();
            if let Some(ms) = config.ledger_timeout_ms {
                builder = builder.timeout(Duration::from_millis(ms));
            }
            let client = builder
                .build()
                .map_err(|e| ServerError::Config(format!("cannot build HTTP client: {e}")))?;

            let key = ServiceAccountKey::load(credentials)?;
            let auth = ServiceAccountAuth::new(key, client.clone())?;
            tracing::info!(
                client_email = auth.client_email(),
                sheet_id = %sheet_id,
                "Sheets ledger configured"
            );

            Ok(Arc::new(SheetsLedger::new(
                client,
                config.sheets_api_base.clone(),
                sheet_id,
                auth,
            )))
        }
    }
}
