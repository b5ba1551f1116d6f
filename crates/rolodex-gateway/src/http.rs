use crate::ContactGateway;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use rolodex_types::{Contact, ContactId, ContactPage, ErrorBody, RemoteError};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

pub const DEFAULT_BASE_URL: &str = "https://avb-contacts-api.herokuapp.com/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`ContactGateway`] over the contact store's REST API
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|err| RemoteError::new(err.to_string()))
    }
}

/// Parse and normalise the base URL so relative joins keep its path
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|err| Error::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "URL cannot carry a path".to_string(),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn transport(err: reqwest::Error) -> RemoteError {
    RemoteError::new(err.to_string())
}

async fn failure(response: Response) -> RemoteError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ErrorBody::into_remote_error(status, &body)
}

/// Decode a 2xx body, or turn anything else into the store's error message
async fn decode<T: DeserializeOwned>(response: Response) -> std::result::Result<T, RemoteError> {
    if !response.status().is_success() {
        return Err(failure(response).await);
    }
    let status = response.status().as_u16();
    let body = response.text().await.map_err(transport)?;
    trace!(status, bytes = body.len(), "response body received");
    serde_json::from_str(&body).map_err(|err| RemoteError::with_status(status, err.to_string()))
}

#[async_trait]
impl ContactGateway for HttpGateway {
    async fn fetch_page(
        &self,
        page: u32,
        items_per_page: u32,
    ) -> std::result::Result<ContactPage, RemoteError> {
        let url = self.endpoint("contacts/paginated")?;
        debug!(%url, page, items_per_page, "GET page");
        let response = self
            .client
            .get(url)
            .query(&[("page", page), ("itemsPerPage", items_per_page)])
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn fetch_one(&self, id: ContactId) -> std::result::Result<Contact, RemoteError> {
        let url = self.endpoint(&format!("contacts/{}", id))?;
        debug!(%url, "GET contact");
        let response = self.client.get(url).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn create(&self, payload: &Contact) -> std::result::Result<Contact, RemoteError> {
        let url = self.endpoint("contacts")?;
        debug!(%url, "POST contact");
        let response = self
            .client
            .post(url)
            .json(&payload.payload())
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn update(
        &self,
        id: ContactId,
        payload: &Contact,
    ) -> std::result::Result<Contact, RemoteError> {
        let url = self.endpoint(&format!("contacts/{}", id))?;
        debug!(%url, "PUT contact");
        let response = self
            .client
            .put(url)
            .json(&payload.payload())
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn delete(&self, id: ContactId) -> std::result::Result<(), RemoteError> {
        let url = self.endpoint(&format!("contacts/{}", id))?;
        debug!(%url, "DELETE contact");
        let response = self.client.delete(url).send().await.map_err(transport)?;
        // Only a plain 200 counts; 204 and friends are reported as failures
        if response.status() == StatusCode::OK {
            return Ok(());
        }
        Err(failure(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let url = parse_base_url("http://127.0.0.1:8080/api").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/");
        assert_eq!(
            url.join("contacts/5").unwrap().as_str(),
            "http://127.0.0.1:8080/api/contacts/5"
        );
    }

    #[test]
    fn test_default_base_url_parses() {
        let url = parse_base_url(DEFAULT_BASE_URL).unwrap();
        assert_eq!(
            url.join("contacts/paginated").unwrap().path(),
            "/contacts/paginated"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }));
        assert!(err.to_string().contains("not a url"));

        assert!(parse_base_url("mailto:someone@example.com").is_err());
    }
}
