pub mod batch;
pub mod file_probe;
pub mod headers;
pub mod http;

pub use crate::domain::model::{BatchStoreOperations, FileProbeResult, HttpRequestConfig};
pub use crate::domain::ports::{HttpClient, KeyValueStore};
pub use crate::utils::error::Result;
