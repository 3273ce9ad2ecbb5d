use anyhow::{anyhow, bail, Context, Result};
use reqwest::{StatusCode, Url};
use tinylink_core::ShortCode;
use tracing::debug;

pub const DEFAULT_SERVER: &str = "http://localhost:8080/";

/// Thin wrapper over the gateway's HTTP routes.
#[derive(Debug, Clone)]
pub struct TinylinkClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TinylinkClient {
    pub fn new(server: &str) -> Result<Self> {
        let mut base_url = Url::parse(server).context("invalid server URL")?;
        if base_url.cannot_be_a_base() {
            bail!("server URL cannot carry a path: {server}");
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<server>/<code>`, which redirects to the original URL.
    pub fn redirect_url(&self, code: &ShortCode) -> Result<Url> {
        self.endpoint(&[code.as_str()])
    }

    /// `<server>/getFullURL/<code>`, which returns the original URL as text.
    pub fn full_url_link(&self, code: &ShortCode) -> Result<Url> {
        self.endpoint(&["getFullURL", code.as_str()])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("server URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn shorten(&self, original_url: &str) -> Result<ShortCode> {
        debug!(url = %original_url, server = %self.base_url, "shortening");
        let response = self
            .http
            .post(self.base_url.clone())
            .form(&[("link", original_url)])
            .send()
            .await
            .context("failed to reach server")?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            bail!("server error ({status}): {body}");
        }

        Ok(ShortCode::new(body.trim()))
    }

    /// Looks up the original URL. A code the server does not know is `None`.
    pub async fn expand(&self, code: &ShortCode) -> Result<Option<String>> {
        let url = self.full_url_link(code)?;
        debug!(%url, "expanding");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("failed to reach server")?;

        match response.status() {
            StatusCode::OK => Ok(Some(response.text().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => bail!("server returned status {}", status.as_u16()),
        }
    }
}
