use std::str::FromStr;

use crate::ledger::sheets::DEFAULT_SHEETS_API_BASE;

/// 账本后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerBackend {
    /// Google Sheets (production)
    Sheets,
    /// In-process ledger, rows are lost on restart (development)
    Memory,
}

impl FromStr for LedgerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sheets" => Ok(Self::Sheets),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown ledger backend: {other}")),
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | - | 日志文件目录 (不设置则只输出到控制台) |
/// | LEDGER_BACKEND | sheets | sheets \| memory |
/// | SHEET_ID | - | 表格 ID |
/// | GOOGLE_APPLICATION_CREDENTIALS | - | 服务账号 JSON 或其文件路径 |
/// | SHEETS_API_BASE | https://sheets.googleapis.com | Sheets API 地址 |
/// | LEDGER_TIMEOUT_MS | - | 账本请求超时 (不设置则无超时) |
///
/// # 示例
///
/// ```ignore
/// LEDGER_BACKEND=memory HTTP_PORT=8080 cargo run -p kiosk-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,

    // === 账本 ===
    pub ledger_backend: LedgerBackend,
    pub sheet_id: Option<String>,
    /// Inline service-account JSON, or a path to the key file
    pub credentials: Option<String>,
    pub sheets_api_base: String,
    /// 账本请求超时 (毫秒)
    pub ledger_timeout_ms: Option<u64>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的环境变量使用默认值；凭证只在构建 sheets 后端时检查
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: non_empty_var("LOG_DIR"),

            ledger_backend: std::env::var("LEDGER_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(LedgerBackend::Sheets),
            sheet_id: non_empty_var("SHEET_ID"),
            credentials: non_empty_var("GOOGLE_APPLICATION_CREDENTIALS"),
            sheets_api_base: std::env::var("SHEETS_API_BASE")
                .unwrap_or_else(|_| DEFAULT_SHEETS_API_BASE.into()),
            ledger_timeout_ms: std::env::var("LEDGER_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// 内存账本配置，常用于测试
    pub fn in_memory() -> Self {
        Self {
            http_port: 0,
            environment: "test".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            ledger_backend: LedgerBackend::Memory,
            sheet_id: None,
            credentials: None,
            sheets_api_base: DEFAULT_SHEETS_API_BASE.into(),
            ledger_timeout_ms: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
