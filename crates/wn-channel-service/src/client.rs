//! reqwest wrapper around the channel service's HTTP API, shared by the
//! controller. Kept in this crate so both sides agree on the request and
//! response shapes without a separate wire-contract crate.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use wn_types::{LinkOutcome, LinkRequest, McsTable, SinrRequest, SinrResult};

use crate::api::mcs_table::RegisterMcsTableRequest;
use crate::api::scene::{LoadSceneRequest, LoadSceneResponse};
use crate::api::transmission::{TransmissionStateRequest, TransmissionStateResponse};
use crate::api::visualization::VisualizationState;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to channel service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("channel service returned {status}: {message}")]
    Service { status: StatusCode, message: String },
}

#[derive(Clone)]
pub struct ChannelServiceClient {
    http: Client,
    base_url: String,
}

impl ChannelServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder().timeout(Duration::from_secs(10)).build().expect("reqwest client builds with default TLS backend");
        Self { http, base_url: base_url.into() }
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ClientError> {
        let response = self.http.post(format!("{}{}", self.base_url, path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        let response = self.http.get(format!("{}{}", self.base_url, path)).send().await?;
        Self::decode(response).await
    }

    async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Service { status, message });
        }
        Ok(response.json::<R>().await?)
    }

    pub async fn load_scene(&self, file: &str, frequency_hz: u64, bandwidth_hz: f64) -> Result<(), ClientError> {
        let _: LoadSceneResponse = self.post("/scene/load", &LoadSceneRequest { file: file.to_string(), frequency_hz, bandwidth_hz }).await?;
        Ok(())
    }

    pub async fn compute_single(&self, request: &LinkRequest) -> Result<LinkOutcome, ClientError> {
        self.post("/compute/single", request).await
    }

    pub async fn compute_batch(&self, requests: &[LinkRequest]) -> Result<Vec<LinkOutcome>, ClientError> {
        self.post("/compute/batch", requests).await
    }

    pub async fn compute_sinr(&self, request: &SinrRequest) -> Result<SinrResult, ClientError> {
        self.post("/compute/sinr", request).await
    }

    pub async fn update_transmission_state(&self, states: HashMap<String, bool>) -> Result<Vec<String>, ClientError> {
        let response: TransmissionStateResponse = self.post("/transmission/state", &TransmissionStateRequest { states }).await?;
        Ok(response.affected_links)
    }

    pub async fn visualization_state(&self) -> Result<VisualizationState, ClientError> {
        self.get("/visualization/state").await
    }

    pub async fn register_mcs_table(&self, table: &McsTable) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/mcs_table/register", self.base_url))
            .json(&RegisterMcsTableRequest { name: table.name().to_string(), entries: table.entries().to_vec() })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Service { status, message });
        }
        Ok(())
    }

    pub async fn health(&self) -> Result<(), ClientError> {
        let _: serde_json::Value = self.get("/health").await?;
        Ok(())
    }
}
