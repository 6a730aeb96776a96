use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};

pub const APP_KEY: &str = "NzNiMDhlYzQyNjJm";

/// 與每個 session 的身分 header 一起送出的固定值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityProfile {
    pub app_key: String,
    pub user_agent: String,
    pub device_type: String,
    pub os: String,
    pub os_version: String,
    pub version_code: String,
    pub user_group: String,
}

impl Default for IdentityProfile {
    fn default() -> Self {
        Self {
            app_key: APP_KEY.to_string(),
            user_agent: "okhttp/4.12.13".to_string(),
            device_type: "phone".to_string(),
            os: "android".to_string(),
            os_version: "13".to_string(),
            version_code: "389".to_string(),
            user_group: "tvYR7NSNn7rymo3F".to_string(),
        }
    }
}

impl IdentityProfile {
    /// 將身分 header 寫入 `headers`，取代先前的值
    ///
    /// 參數不做驗證。無法成為合法 header 值的參數會移除該 header 的舊值並記錄警告
    pub fn apply(&self, headers: &mut HeaderMap, device_id: &str, crm_id: &str, unique_id: &str) {
        let entries: [(HeaderName, &str); 13] = [
            (HeaderName::from_static("appkey"), self.app_key.as_str()),
            (HeaderName::from_static("deviceid"), device_id),
            (HeaderName::from_static("crmid"), crm_id),
            (HeaderName::from_static("userid"), crm_id),
            (HeaderName::from_static("subscriberid"), crm_id),
            (HeaderName::from_static("uniqueid"), unique_id),
            (HeaderName::from_static("devicetype"), self.device_type.as_str()),
            (HeaderName::from_static("os"), self.os.as_str()),
            (HeaderName::from_static("osversion"), self.os_version.as_str()),
            (HeaderName::from_static("versioncode"), self.version_code.as_str()),
            (HeaderName::from_static("usergroup"), self.user_group.as_str()),
            (USER_AGENT, self.user_agent.as_str()),
            (ACCEPT, "application/json"),
        ];

        for (name, value) in entries {
            match HeaderValue::from_str(value) {
                Ok(value) => {
                    headers.insert(name, value);
                }
                Err(_) => {
                    headers.remove(&name);
                    tracing::warn!(header = %name, "dropping header with an unrepresentable value");
                }
            }
        }
    }
}

/// 以預設 profile 設定身分 header
pub fn set_common_headers(headers: &mut HeaderMap, device_id: &str, crm_id: &str, unique_id: &str) {
    IdentityProfile::default().apply(headers, device_id, crm_id, unique_id);
}

pub fn set_common_request_headers(
    request: &mut reqwest::Request,
    device_id: &str,
    crm_id: &str,
    unique_id: &str,
) {
    set_common_headers(request.headers_mut(), device_id, crm_id, unique_id);
}
