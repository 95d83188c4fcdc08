//! reqwest implementation of the catalog and assistant contracts.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Category, Product},
    protocol::{ChatQuery, ChatReply},
};

use crate::{
    backend::{AssistantBackend, CatalogSource},
    config::{Endpoints, Settings},
    error::RequestError,
};

pub struct HttpBackend {
    http: Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: Client::new(),
            endpoints,
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let endpoints = Endpoints::from_base(&settings.server_url)?;
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

fn ensure_success(res: Response) -> Result<Response, RequestError> {
    let status = res.status();
    if status.is_success() {
        Ok(res)
    } else {
        Err(RequestError::Status(status.as_u16()))
    }
}

/// Reads the body first so a body that fails to decode is reported as malformed
/// rather than as a transport failure.
async fn decode_body<T: DeserializeOwned>(res: Response) -> Result<T, RequestError> {
    let body = res.bytes().await?;
    serde_json::from_slice(&body).map_err(|err| RequestError::Malformed(err.to_string()))
}

#[async_trait]
impl CatalogSource for HttpBackend {
    async fn fetch_products(&self, category: Category) -> Result<Vec<Product>, RequestError> {
        let res = self
            .http
            .get(self.endpoints.catalog(category).clone())
            .send()
            .await?;
        decode_body(ensure_success(res)?).await
    }
}

#[async_trait]
impl AssistantBackend for HttpBackend {
    async fn ask(&self, query: &str) -> Result<String, RequestError> {
        let res = self
            .http
            .post(self.endpoints.chat().clone())
            .json(&ChatQuery::new(query))
            .send()
            .await?;
        let reply: ChatReply = decode_body(ensure_success(res)?).await?;
        Ok(reply.response)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
