use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::models::decode_messages;

pub struct ApiClient {
    pub http: HttpClient,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
        }
    }

    pub fn messages_url(base: &str) -> String {
        format!("{}/messages", base.trim_end_matches('/'))
    }

    pub fn send_url(base: &str) -> String {
        format!("{}/send", base.trim_end_matches('/'))
    }

    /// Fetch the current message list. Tolerates the structured and wrapped
    /// body shapes the backend may produce; any unusable body is a parse
    /// failure and the caller keeps its previous list.
    pub async fn fetch_messages(&self, base: &str) -> Result<Vec<String>, ApiError> {
        let endpoint = Self::messages_url(base);
        log::debug!("GET {endpoint}");
        let resp = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(ApiError::Network)?;
        let body: Value = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        decode_messages(body).ok_or_else(|| ApiError::Parse("body is not a message list".into()))
    }

    /// Post one message. Success is any 2xx status; the response body is not
    /// consumed.
    pub async fn send_message(&self, base: &str, message: &str) -> Result<(), ApiError> {
        let endpoint = Self::send_url(base);
        log::debug!("POST {endpoint}");
        let body = serde_json::json!({ "message": message });
        let resp = self
            .http
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::Network)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Rejected(status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClient;

    #[test]
    fn endpoint_urls_tolerate_trailing_slash() {
        assert_eq!(
            ApiClient::messages_url("http://localhost:8080/"),
            "http://localhost:8080/messages"
        );
        assert_eq!(
            ApiClient::send_url("http://localhost:8080"),
            "http://localhost:8080/send"
        );
    }
}
