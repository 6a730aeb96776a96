//! 請求執行、JSON 請求建立與 JSON 回應解析
//!
//! 一般流程是 [`HttpExecutor::send_json`]（原始 body 則用
//! [`HttpExecutor::execute`]），接著 [`parse_json_response`]。
//! 這裡不做重試也不管理連線池，這些由注入的 [`HttpClient`] 決定

use crate::domain::model::HttpRequestConfig;
use crate::domain::ports::HttpClient;
use crate::utils::error::{Result, UtilError};
use crate::utils::safe_log::Logger;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub struct HttpExecutor<C: HttpClient> {
    client: C,
    logger: Logger,
}

impl<C: HttpClient> HttpExecutor<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            logger: Logger::default(),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// 依 `config` 建立請求並送出一次
    ///
    /// 回應 body 不會被讀取。建立與傳輸錯誤原樣回傳
    pub async fn execute(&self, config: HttpRequestConfig) -> Result<Response> {
        let request = build_request(config)?;
        let method = request.method().clone();
        let url = request.url().clone();

        tracing::debug!(method = %method, url = %url, "Executing HTTP request");

        let response = self.client.send(request).await.map_err(|e| {
            tracing::error!(method = %method, url = %url, error = %e, "HTTP request failed");
            self.logger
                .log_fmt(format_args!("{} {} failed: {}", method, url, e));
            e
        })?;

        tracing::debug!(status = response.status().as_u16(), url = %url, "HTTP response received");
        Ok(response)
    }

    /// 將 `payload` 序列化成 JSON，並以 JSON content type 送出
    ///
    /// `extra_headers` 在 content type 之後套用，可以覆蓋它。
    /// payload 無法序列化時直接失敗，不會送出任何請求
    pub async fn send_json<T>(
        &self,
        url: &str,
        method: &str,
        payload: &T,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Response>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(UtilError::Serialization)?;

        let mut headers = HashMap::new();
        headers.insert(CONTENT_TYPE.as_str().to_string(), JSON_CONTENT_TYPE.to_string());
        if let Some(extra) = extra_headers {
            for (name, value) in extra {
                if name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
                    headers.remove(CONTENT_TYPE.as_str());
                }
                headers.insert(name.clone(), value.clone());
            }
        }

        let config = HttpRequestConfig {
            url: url.to_string(),
            method: method.to_string(),
            headers: Some(headers),
            body: Some(body),
        };
        self.execute(config).await
    }
}

/// 將宣告式設定轉成 `reqwest::Request`
pub fn build_request(config: HttpRequestConfig) -> Result<Request> {
    if config.url.is_empty() {
        return Err(UtilError::InvalidRequest {
            field: "url".to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }
    if config.method.is_empty() {
        return Err(UtilError::InvalidRequest {
            field: "method".to_string(),
            reason: "method cannot be empty".to_string(),
        });
    }

    let method =
        Method::from_bytes(config.method.as_bytes()).map_err(|e| UtilError::InvalidRequest {
            field: "method".to_string(),
            reason: format!("invalid HTTP method '{}': {}", config.method, e),
        })?;
    let url = Url::parse(&config.url)?;

    let mut request = Request::new(method, url);
    if let Some(headers) = &config.headers {
        apply_headers(request.headers_mut(), headers)?;
    }
    if let Some(body) = config.body {
        *request.body_mut() = Some(body.into());
    }
    Ok(request)
}

fn apply_headers(target: &mut HeaderMap, headers: &HashMap<String, String>) -> Result<()> {
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| UtilError::InvalidRequest {
                field: "headers".to_string(),
                reason: format!("invalid header name '{}': {}", name, e),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| UtilError::InvalidRequest {
            field: "headers".to_string(),
            reason: format!("invalid value for header '{}': {}", name, e),
        })?;
        target.insert(header_name, header_value);
    }
    Ok(())
}

/// 透過 `client` 送出 `config`，不附帶 logger
pub async fn make_http_request<C: HttpClient>(
    config: HttpRequestConfig,
    client: &C,
) -> Result<Response> {
    HttpExecutor::new(client).execute(config).await
}

pub async fn make_json_request<T, C>(
    url: &str,
    method: &str,
    payload: &T,
    extra_headers: Option<&HashMap<String, String>>,
    client: &C,
) -> Result<Response>
where
    T: Serialize + ?Sized,
    C: HttpClient,
{
    HttpExecutor::new(client)
        .send_json(url, method, payload, extra_headers)
        .await
}

/// 檢查狀態碼並將 JSON body 解析到 `target`
///
/// 發生任何錯誤時 `target` 保持不變。非 2xx 狀態碼直接失敗，不讀取 body
pub async fn parse_json_response<T: DeserializeOwned>(
    response: Response,
    target: &mut T,
) -> Result<()> {
    *target = decode_json(response).await?;
    Ok(())
}

pub async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), url = %response.url(), "Unexpected response status");
        return Err(UtilError::UnexpectedStatus {
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| UtilError::Decode { source })
}
