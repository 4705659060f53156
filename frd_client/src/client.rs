use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use shared_utils::env::get_env_var;

use crate::archive::extract_zip;
use crate::endpoint::Endpoint;
use crate::errors::ClientError;
use crate::params::QueryParams;
use crate::source::RemoteSource;

/// Production base URL of the bulk-data API.
pub const BASE_URL: &str = "https://firstratedata.com/api";

/// Environment variable holding the caller identifier.
pub const USERID_VAR: &str = "FRD_USERID";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Blocking HTTP client for the bulk-data API.
///
/// Every request carries the caller `userid`. Archive endpoints answer with
/// ZIP bodies; `last_update` answers with a bare date string.
pub struct ApiClient {
    http: Client,
    base_url: String,
    userid: String,
}

impl ApiClient {
    /// Creates a client against the production [`BASE_URL`].
    pub fn new(userid: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_base_url(userid, BASE_URL)
    }

    /// Creates a client against a custom base URL (mirrors, test servers).
    pub fn with_base_url(
        userid: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            userid: userid.into(),
        })
    }

    /// Creates a client reading the caller identifier from [`USERID_VAR`].
    pub fn from_env() -> Result<Self, ClientError> {
        Ok(Self::new(get_env_var(USERID_VAR)?)?)
    }

    fn get_bytes(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Vec<u8>, ClientError> {
        let url = format!("{}/{}", self.base_url, endpoint.as_str());
        let response = self
            .http
            .get(&url)
            .query(params.as_slice())
            .query(&[("userid", self.userid.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ClientError::Api { status, body });
        }
        Ok(response.bytes()?.to_vec())
    }
}

impl RemoteSource for ApiClient {
    fn fetch_archive(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
        dest: &Path,
    ) -> Result<(), ClientError> {
        let raw = self.get_bytes(endpoint, params)?;
        extract_zip(&raw, dest)
    }

    fn fetch_text(&self, endpoint: Endpoint, params: &QueryParams) -> Result<String, ClientError> {
        let raw = self.get_bytes(endpoint, params)?;
        Ok(String::from_utf8(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_in_base_url_is_normalized() {
        let client = ApiClient::with_base_url("u1", "http://localhost:8080/api/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/api");
    }
}
