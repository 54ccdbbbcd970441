use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::{AlertRequest, LineId, VehiclePosition, VehicleSnapshot};
use crate::error::ApiError;

use super::TransitApi;
use super::wire::{AlertReply, PositionRecord};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

pub const DEFAULT_USER_AGENT: &str = concat!("buswatch/", env!("CARGO_PKG_VERSION"));

const API_PREFIX: [&str; 2] = ["api", "v1"];
const POSITIONS_RESOURCE: &str = "posicoes";
const ALERTS_RESOURCE: &str = "alertas";

/// [`TransitApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpTransitApi {
    client: Client,
    base: Url,
}

impl HttpTransitApi {
    /// Builds the client once; it is reused for every request.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` is not an absolute hierarchical URL or
    /// the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|err| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source: err,
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::BaseUrlNotHierarchical {
                url: base_url.to_owned(),
            });
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| ApiError::BuildClientFailed { source: err })?;

        Ok(Self { client, base })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/api/v1/{segments...}`, each segment percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::BaseUrlNotHierarchical {
                url: self.base.to_string(),
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    async fn decode<T>(url: &Url, response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.json::<T>().await.map_err(|err| ApiError::Decode {
            url: url.to_string(),
            source: err,
        })
    }
}

#[async_trait]
impl TransitApi for HttpTransitApi {
    async fn fetch_positions(&self, line: &LineId) -> Result<VehicleSnapshot, ApiError> {
        let url = self.endpoint(&[POSITIONS_RESOURCE, line.as_str()])?;
        debug!("GET {}", url);
        let response =
            self.client
                .get(url.clone())
                .send()
                .await
                .map_err(|err| ApiError::Request {
                    url: url.to_string(),
                    source: err,
                })?;
        let records: Vec<PositionRecord> = Self::decode(&url, response).await?;
        Ok(records
            .into_iter()
            .map(VehiclePosition::from)
            .collect::<Vec<_>>()
            .into())
    }

    async fn create_alert(&self, request: &AlertRequest) -> Result<AlertReply, ApiError> {
        let url = self.endpoint(&[ALERTS_RESOURCE])?;
        debug!(line = %request.line, "POST {}", url);
        let response = self
            .client
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| ApiError::Request {
                url: url.to_string(),
                source: err,
            })?;
        Self::decode(&url, response).await
    }
}
