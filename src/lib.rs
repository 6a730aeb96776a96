pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{MemoryStore, TomlFileStore};
pub use config::ClientConfig;
pub use crate::core::batch::{execute_batch_store_operations, BatchStoreOperator, FailurePolicy};
pub use crate::core::file_probe::{check_and_read_file, check_and_read_file_async};
pub use crate::core::headers::{set_common_headers, set_common_request_headers, IdentityProfile, APP_KEY};
pub use crate::core::http::{
    decode_json, make_http_request, make_json_request, parse_json_response, HttpExecutor,
};
pub use domain::model::{BatchStoreOperations, FileProbeResult, HttpRequestConfig};
pub use domain::ports::{HttpClient, KeyValueStore};
pub use utils::error::{Result, UtilError};
pub use utils::safe_log::{
    log_and_return_error, safe_log, safe_logf, set_global_logger, LogSink, Logger,
};
