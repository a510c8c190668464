use std::time::Duration;

use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};

use crate::{
    api::types::ErrorDto,
    core::ReaderError,
};

pub fn http_client(timeout_secs: u64) -> Result<Client, ReaderError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ReaderError::Custom(format!("HTTP client build failed: {e}")))
}

pub fn user_agent() -> (reqwest::header::HeaderName, &'static str) {
    (USER_AGENT, "readlingo/0.1 (+reqwest)")
}

/// Passes successful responses through; turns anything else into
/// `ReaderError::Api`, using the `{ error }` body when the server sent one.
pub async fn ensure_success(resp: Response) -> Result<Response, ReaderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let url = resp.url().to_string();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorDto>(&body)
        .ok()
        .and_then(|e| e.error)
        .unwrap_or_else(|| format!("HTTP error {} from {}", status, url));

    Err(ReaderError::Api { status: status.as_u16(), message })
}
