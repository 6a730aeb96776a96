//! 容忍後端未設定的日誌介面
//!
//! 元件在建構時取得 [`Logger`]，預設為 null object，呼叫端不需檢查是否存在。
//! 無法傳遞 logger 的程式碼可使用全域 handle，每次讀取都可能是「未設定」

use crate::utils::error::UtilError;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

pub trait LogSink: Send + Sync {
    fn log(&self, message: &str);

    fn log_fmt(&self, args: fmt::Arguments<'_>) {
        self.log(&args.to_string());
    }
}

/// 丟棄所有訊息
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogSink;

impl LogSink for NullLogSink {
    fn log(&self, _message: &str) {}

    fn log_fmt(&self, _args: fmt::Arguments<'_>) {}
}

/// 以 info 等級轉送到 `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn log_fmt(&self, args: fmt::Arguments<'_>) {
        tracing::info!("{}", args);
    }
}

#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new<S: LogSink + 'static>(sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    pub fn null() -> Self {
        Self::new(NullLogSink)
    }

    pub fn tracing() -> Self {
        Self::new(TracingLogSink)
    }

    pub fn log(&self, message: &str) {
        self.sink.log(message);
    }

    pub fn log_fmt(&self, args: fmt::Arguments<'_>) {
        self.sink.log_fmt(args);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

static GLOBAL_LOGGER: RwLock<Option<Logger>> = RwLock::new(None);

/// 替換全域 logger 並回傳先前的 logger
pub fn set_global_logger(logger: Option<Logger>) -> Option<Logger> {
    let mut slot = GLOBAL_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, logger)
}

pub fn global_logger() -> Option<Logger> {
    GLOBAL_LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// 透過全域 logger 記錄 `message`；未設定時不做任何事
pub fn safe_log(message: &str) {
    // 先複製出鎖外，較慢的 sink 不會擋住寫入者
    if let Some(logger) = global_logger() {
        logger.log(message);
    }
}

pub fn safe_logf(args: fmt::Arguments<'_>) {
    if let Some(logger) = global_logger() {
        logger.log_fmt(args);
    }
}

/// [`safe_logf`] 的 `format!` 風格入口
#[macro_export]
macro_rules! safe_logf {
    ($($arg:tt)*) => {
        $crate::utils::safe_log::safe_logf(::std::format_args!($($arg)*))
    };
}

/// 為 `err` 加上 `context`、記錄後回傳，方便搭配 `?`
///
/// 原始錯誤可透過 `source()` 取得，其訊息也保留在合併後的訊息中
pub fn log_and_return_error<E: Into<UtilError>>(err: E, context: &str) -> UtilError {
    let source = err.into();
    tracing::error!(context = %context, error = %source, "operation failed");
    safe_logf(format_args!("{}: {}", context, source));
    UtilError::Context {
        context: context.to_string(),
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<String>>,
    }

    impl LogSink for Arc<RecordingSink> {
        fn log(&self, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }
    }

    // 全域 logger 是共享狀態，測試之間用鎖序列化
    static GLOBAL_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn test_safe_log_without_logger_is_noop() {
        let _guard = GLOBAL_GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        let original = set_global_logger(None);

        safe_log("test message");
        safe_logf!("test message {}", "value");
        safe_logf!("no args at all");

        set_global_logger(original);
    }

    #[test]
    fn test_safe_log_forwards_to_logger() {
        let _guard = GLOBAL_GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        let sink = Arc::new(RecordingSink::default());
        let original = set_global_logger(Some(Logger::new(sink.clone())));

        safe_log("plain");
        safe_logf!("formatted {} {}", 1, "two");

        set_global_logger(original);
        let lines = sink.lines.lock().unwrap();
        assert_eq!(lines.as_slice(), ["plain", "formatted 1 two"]);
    }

    #[test]
    fn test_concurrent_swaps_do_not_panic() {
        let _guard = GLOBAL_GUARD.lock().unwrap_or_else(PoisonError::into_inner);
        let original = set_global_logger(None);

        let writer = std::thread::spawn(|| {
            for i in 0..200 {
                let next = if i % 2 == 0 { Some(Logger::null()) } else { None };
                set_global_logger(next);
            }
        });
        for i in 0..200 {
            safe_logf!("iteration {}", i);
        }
        writer.join().unwrap();

        set_global_logger(original);
    }

    #[test]
    fn test_log_and_return_error_keeps_context_and_original() {
        let original = UtilError::StoreError {
            message: "original error".to_string(),
        };
        let err = log_and_return_error(original, "test context");

        let message = err.to_string();
        assert!(message.contains("test context"));
        assert!(message.contains("original error"));
        assert!(err.source().unwrap().to_string().contains("original error"));
    }

    #[test]
    fn test_default_logger_is_null() {
        let logger = Logger::default();
        logger.log("dropped");
        logger.log_fmt(format_args!("dropped {}", 1));
    }
}
