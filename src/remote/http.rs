//! reqwest implementation of the event endpoints.
//!
//! # Security Note - Credentials
//!
//! The session cookie and CSRF token are kept in `SecretString` and the
//! header values built from them are marked sensitive, so they show up as
//! `Sensitive` if reqwest's request logging is enabled.

use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::config::Config;
use crate::error::{Result, SecdeskError};
use crate::types::{BatchUpdateRequest, SearchResultPage};

use super::EventApi;

const CSRF_HEADER: &str = "X-CSRFToken";

pub struct HttpEventApi {
    client: Client,
    search_url: Url,
    update_url: Url,
    session_cookie: Option<SecretString>,
    csrf_token: Option<SecretString>,
}

impl HttpEventApi {
    /// Build a client from configuration, applying the configured
    /// connect and total timeouts.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        let api = Self {
            client,
            search_url: config.search_url()?,
            update_url: config.update_url()?,
            session_cookie: config.session_cookie.clone().map(SecretString::from),
            csrf_token: config.csrf_token.clone().map(SecretString::from),
        };

        // Surface unusable credentials now rather than on the first request.
        if let Some(cookie) = &api.session_cookie {
            sensitive(cookie, "session_cookie")?;
        }
        if let Some(token) = &api.csrf_token {
            sensitive(token, "csrf_token")?;
        }

        Ok(api)
    }

    fn authorize(&self, mut builder: RequestBuilder) -> Result<RequestBuilder> {
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(header::COOKIE, sensitive(cookie, "session_cookie")?);
        }
        if let Some(token) = &self.csrf_token {
            builder = builder.header(CSRF_HEADER, sensitive(token, "csrf_token")?);
        }
        Ok(builder)
    }
}

fn sensitive(secret: &SecretString, name: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(secret.expose_secret())
        .map_err(|_| SecdeskError::Config(format!("{name} is not a valid header value")))?;
    value.set_sensitive(true);
    Ok(value)
}

fn check_status(response: &Response, endpoint: &'static str) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        return Err(SecdeskError::HttpStatus {
            endpoint,
            status: status.as_u16(),
        });
    }
    Ok(())
}

impl EventApi for HttpEventApi {
    async fn search(&self, query: &[(String, String)]) -> Result<SearchResultPage> {
        let response = self
            .authorize(self.client.get(self.search_url.clone()))?
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        check_status(&response, "search")?;

        let body = response.text().await?;
        SearchResultPage::from_json(&body)
    }

    async fn update(&self, request: &BatchUpdateRequest) -> Result<()> {
        let response = self
            .authorize(self.client.post(self.update_url.clone()))?
            .form(&request.to_form())
            .send()
            .await?;

        check_status(&response, "update")
    }
}
