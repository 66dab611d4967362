use crate::error::{CrmError, Result};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, USER_AGENT};
use std::sync::Arc;

/// A fetched page: the URL the request finally resolved to after redirects,
/// the response status, and the body text.
///
/// The final URL matters as much as the body here: the CRM signals success
/// and failure of form posts purely by where it redirects.
#[derive(Debug, Clone)]
pub struct Page {
    pub final_url: String,
    pub status: u16,
    pub body: String,
}

/// The HTTP boundary of the crate. One implementation speaks real HTTP with
/// an ambient cookie session; tests substitute canned pages.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Page>;
    async fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Page>;
}

/// reqwest-backed transport with a per-instance cookie jar, so each value is
/// one browser-like session.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let cookie_jar = Arc::new(Jar::default());

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.0.0 Safari/537.36"
                .parse()
                .unwrap(),
        );

        let client = reqwest::Client::builder()
            .cookie_provider(cookie_jar)
            .default_headers(headers)
            .build()
            .unwrap();

        Self { client }
    }

    async fn into_page(response: reqwest::Response) -> Result<Page> {
        let final_url = response.url().to_string();
        let status = response.status().as_u16();
        // 4xx pages still carry form re-renders worth inspecting; only
        // server-side failure is a transport error.
        if status >= 500 {
            return Err(CrmError::UnexpectedStatus {
                status,
                url: final_url,
            });
        }
        let body = response.text().await?;
        Ok(Page {
            final_url,
            status,
            body,
        })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Page> {
        let response = self.client.get(url).send().await?;
        Self::into_page(response).await
    }

    async fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<Page> {
        let response = self.client.post(url).form(&fields).send().await?;
        Self::into_page(response).await
    }
}
