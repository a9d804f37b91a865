use crate::prelude::*;
use jiratools_core::atlassian::jira::parse_error_body;
use serde::de::DeserializeOwned;

pub mod jira;

/// Atlassian configuration from environment variables
#[derive(Debug, Clone)]
pub struct AtlassianConfig {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
}

impl AtlassianConfig {
    /// Load configuration from environment variables.
    /// `--base-url` takes precedence over ATLASSIAN_BASE_URL.
    pub fn resolve(global: &crate::Global) -> Result<Self> {
        let base_url = match &global.base_url {
            Some(url) => url.clone(),
            None => env_var("ATLASSIAN_BASE_URL")?,
        };

        Ok(Self {
            base_url,
            email: env_var("ATLASSIAN_EMAIL")?,
            api_token: env_var("ATLASSIAN_API_TOKEN")?,
        })
    }

    /// Base URL without a trailing slash, ready for path concatenation
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn env_var(name: &'static str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::MissingConfig(name).into())
}

/// Create an authenticated HTTP client with Basic Auth headers
pub fn create_authenticated_client(config: &AtlassianConfig) -> Result<reqwest::Client> {
    use base64::Engine;
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

    let auth_string = format!("{}:{}", config.email, config.api_token);
    let auth_encoded = base64::engine::general_purpose::STANDARD.encode(&auth_string);

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {auth_encoded}"))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Send a request, turning transport failures and non-success statuses into errors
pub async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    log::debug!("{} {}", response.status(), response.url());

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status,
            message: parse_error_body(&body),
        }
        .into());
    }

    Ok(response)
}

/// Send a request and decode its JSON body
pub async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    what: &str,
) -> Result<T> {
    send(request)
        .await?
        .json::<T>()
        .await
        .map_err(|e| eyre!("Failed to parse {} response: {}", what, e))
}
