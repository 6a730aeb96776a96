pub mod error;
pub mod logger;
pub mod safe_log;
pub mod validation;
