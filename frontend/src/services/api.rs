use async_trait::async_trait;
use gloo::net::http::Request;
use shared::{FragmentError, FragmentFetcher, FragmentRequest};

/// API client for the calendar fragment endpoints
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    csrf_token: String,
}

impl ApiClient {
    /// Create a client for the page's origin
    pub fn new(base_url: String, csrf_token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf_token,
        }
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
        }
    }

    /// Get a server-rendered calendar fragment
    pub async fn get_fragment(&self, request: &FragmentRequest) -> Result<String, FragmentError> {
        let url = self.url_for(&request.endpoint);

        match Request::get(&url)
            .query(request.query_pairs(&self.csrf_token))
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    response
                        .text()
                        .await
                        .map_err(|e| FragmentError::fetch_failed(e.to_string()))
                } else {
                    Err(FragmentError::fetch_failed(status_message(
                        response.status(),
                        &response.status_text(),
                    )))
                }
            }
            Err(e) => Err(FragmentError::fetch_failed(e.to_string())),
        }
    }
}

#[async_trait(?Send)]
impl FragmentFetcher for ApiClient {
    async fn fetch(&self, request: &FragmentRequest) -> Result<String, FragmentError> {
        self.get_fragment(request).await
    }
}

/// The status text is what the user sees; some servers send none
fn status_message(status: u16, status_text: &str) -> String {
    if status_text.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        status_text.to_string()
    }
}
