use crate::adapters::TomlFileStore;
use crate::core::headers::IdentityProfile;
use crate::utils::error::{Result, UtilError};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub http: HttpConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub identity: IdentityProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "./store.toml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(UtilError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| UtilError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STORE_PATH})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| UtilError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 依 `[http]` 設定建立 reqwest client；逾時只由這裡決定
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .connect_timeout(Duration::from_secs(self.http.connect_timeout_seconds));

        if let Some(user_agent) = &self.http.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(builder.build()?)
    }

    pub fn open_store(&self) -> Result<TomlFileStore> {
        TomlFileStore::open(&self.store.path)
    }

    pub fn identity_profile(&self) -> &IdentityProfile {
        &self.identity
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 600)?;
        validate_range(
            "http.connect_timeout_seconds",
            self.http.connect_timeout_seconds,
            1,
            self.http.timeout_seconds.max(1),
        )?;
        if let Some(user_agent) = &self.http.user_agent {
            validate_non_empty_string("http.user_agent", user_agent)?;
        }

        validate_path("store.path", &self.store.path)?;
        validate_one_of("logging.level", &self.logging.level, &LOG_LEVELS)?;

        validate_non_empty_string("identity.app_key", &self.identity.app_key)?;
        validate_non_empty_string("identity.user_agent", &self.identity.user_agent)?;

        Ok(())
    }
}
