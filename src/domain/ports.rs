use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// 送出一個請求並取回一個回應
///
/// 連線重用、TLS 與逾時由實作決定；呼叫端自行注入，測試可替換成自己的版本
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response>;
}

#[async_trait]
impl<'a, T: HttpClient + ?Sized> HttpClient for &'a T {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        (**self).send(request).await
    }
}

/// 外部字串 key-value 儲存區
///
/// 對不存在的 key 呼叫 `get` 會回傳 `UtilError::KeyNotFound`
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}
