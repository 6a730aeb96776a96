use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{Result, UtilError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("stream_client_utils={},warn", config.level))
    })
}

/// 依 `config` 安裝全域 `tracing` subscriber
///
/// 已安裝過 subscriber 時回傳錯誤而不是 panic（測試執行檔中很常見）
pub fn init_logger(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .try_init(),
    };

    installed.map_err(|e| UtilError::ConfigValidationError {
        field: "logging".to_string(),
        message: format!("failed to install tracing subscriber: {}", e),
    })
}
