//! Thin JSON-over-HTTP client for the music_page backend.
//!
//! Every request is resolved against a fixed API root. Failures are logged as
//! warnings at this boundary and handed back to the caller as a [`RequestError`].

use crate::api_client::RequestError;
use crate::configuration::ApiSettings;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RequestClient {
    client: Client,
    root_url: String,
}

impl RequestClient {
    /// Creates a client for the API root found in the settings.
    ///
    /// # Example
    ///
    /// ```
    /// use music_page::{ApiSettings, RequestClient};
    ///
    /// let client = RequestClient::new(&ApiSettings::new("http://localhost:5000/music_page/api/v1.0"));
    /// assert_eq!(client.url_for("years"), "http://localhost:5000/music_page/api/v1.0/years");
    /// ```
    pub fn new(settings: &ApiSettings) -> Self {
        Self::with_root(&settings.api_root_url)
    }

    pub fn with_root(root_url: &str) -> Self {
        let mut root_url = root_url.trim().to_string();
        if !root_url.ends_with('/') {
            root_url.push('/');
        }

        Self {
            client: Client::new(),
            root_url,
        }
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Joins `path` onto the API root.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.root_url, path.trim_start_matches('/'))
    }

    /// Issues a request and returns the parsed JSON body.
    ///
    /// When `body` is given it is sent as JSON with an `application/json` content type.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the API root, e.g. `"years"` or `"content/2014"`.
    /// * `method` - HTTP method to use.
    /// * `body` - Optional JSON payload.
    ///
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, RequestError> {
        self.send(path, method, body).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        self.send::<T, ()>(path, Method::GET, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, Method::POST, Some(body)).await
    }

    async fn send<T, B>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
    ) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let full_url = self.url_for(path);

        match self.try_send(&full_url, method.clone(), body).await {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                warn!(%method, url = %full_url, error = %e, "request failed");
                Err(e)
            }
        }
    }

    async fn try_send<T, B>(
        &self,
        full_url: &str,
        method: Method,
        body: Option<&B>,
    ) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = Url::parse(full_url).map_err(|e| RequestError::InvalidUrl {
            url: full_url.to_string(),
            reason: e.to_string(),
        })?;

        debug!(%method, %url, "sending request");
        let mut builder = self.client.request(method, url);
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body).map_err(RequestError::Encode)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                url: full_url.to_string(),
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
