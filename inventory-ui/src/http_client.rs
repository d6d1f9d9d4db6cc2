//! JSON-over-HTTP client used by the product API.
//!
//! Every request is built from the configured base URL plus a list of path
//! segments, so ids that contain `/` or spaces are escaped rather than spliced
//! into the path.

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Resource already exists")]
    Conflict,
    #[error("Server error: {status}")]
    ServerError { status: u16 },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpApiError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, HttpApiError::Conflict)
    }

    /// Status code reported by the server, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpApiError::Conflict => Some(StatusCode::CONFLICT.as_u16()),
            HttpApiError::ServerError { status } => Some(*status),
            HttpApiError::Network(e) => e.status().map(|s| s.as_u16()),
            HttpApiError::Serialization(_) | HttpApiError::InvalidUrl(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HttpApiError>;

#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: Url,
    client: Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| HttpApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(HttpApiError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// An empty final segment produces a trailing slash: `["product", ""]` is `/product/`.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HttpApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get_json<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R> {
        let response = self.send(Method::GET, segments, None::<&()>).await?;
        let body = response.text().await?;
        log::trace!("[HTTP] response body: {}", body);
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn post_json<T: Serialize + ?Sized>(&self, segments: &[&str], body: &T) -> Result<()> {
        self.send(Method::POST, segments, Some(body)).await?;
        Ok(())
    }

    pub async fn patch_json<T: Serialize + ?Sized>(&self, segments: &[&str], body: &T) -> Result<()> {
        self.send(Method::PATCH, segments, Some(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<()> {
        self.send(Method::DELETE, segments, None::<&()>).await?;
        Ok(())
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&T>,
    ) -> Result<Response> {
        let url = self.endpoint(segments)?;
        log::debug!("[HTTP] {} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            log::error!("[HTTP] {} {} failed: {}", method, url, e);
            HttpApiError::from(e)
        })?;

        let status = response.status();
        log::debug!("[HTTP] {} {} -> {}", method, url, status);

        if status == StatusCode::CONFLICT {
            return Err(HttpApiError::Conflict);
        }
        if !status.is_success() {
            return Err(HttpApiError::ServerError {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}
