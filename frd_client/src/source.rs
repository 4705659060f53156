//! Transport abstraction over the bulk-data API.
//!
//! [`RemoteSource`] is the seam the sync layer depends on: a concrete
//! [`ApiClient`](crate::client::ApiClient) in production, a scripted fake in
//! tests. The trait is object safe on purpose so handlers can share one
//! client selected at runtime (`Arc<dyn RemoteSource>`).

use std::path::Path;

use crate::endpoint::Endpoint;
use crate::errors::ClientError;
use crate::params::QueryParams;

pub trait RemoteSource {
    /// Download the archive at `endpoint` and materialize its members under `dest`.
    fn fetch_archive(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
        dest: &Path,
    ) -> Result<(), ClientError>;

    /// Fetch a small text body (e.g. the `last_update` freshness probe).
    fn fetch_text(&self, endpoint: Endpoint, params: &QueryParams) -> Result<String, ClientError>;
}
