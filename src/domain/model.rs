use std::collections::{BTreeMap, HashMap};
use std::io;

/// 以宣告方式描述的單一 HTTP 請求
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRequestConfig {
    pub url: String,
    pub method: String,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequestConfig {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            headers: None,
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// 一次呼叫中要套用到 key-value 儲存區的變更
///
/// set 與 delete 彼此獨立，同一個 key 可以同時出現在兩邊
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStoreOperations {
    pub sets: BTreeMap<String, String>,
    pub deletes: Vec<String>,
}

impl BatchStoreOperations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.sets.insert(key.into(), value.into());
        self
    }

    pub fn delete(mut self, key: impl Into<String>) -> Self {
        self.deletes.push(key.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty() && self.deletes.is_empty()
    }
}

/// 探測本機檔案的結果
///
/// 檔案不存在時 `exists == false` 且沒有錯誤；其他失敗才帶有錯誤
#[derive(Debug)]
pub struct FileProbeResult {
    pub exists: bool,
    pub data: Option<Vec<u8>>,
    pub error: Option<io::Error>,
}

impl FileProbeResult {
    pub fn found(data: Vec<u8>) -> Self {
        Self {
            exists: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn missing() -> Self {
        Self {
            exists: false,
            data: None,
            error: None,
        }
    }

    pub fn failed(error: io::Error) -> Self {
        Self {
            exists: false,
            data: None,
            error: Some(error),
        }
    }

    /// 檔案不存在回傳 `Ok(None)`，讀取成功回傳 `Ok(Some(data))`，其餘為 `Err`
    pub fn into_result(self) -> io::Result<Option<Vec<u8>>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.data),
        }
    }
}
