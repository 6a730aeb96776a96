use crate::domain::ports::HttpClient;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
impl HttpClient for reqwest::Client {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        let response = self.execute(request).await?;
        Ok(response)
    }
}
