//! 基于 reqwest 的 HTTP 传输。

use crate::transport::{ApiRequest, RawResponse, RequestBody, Transport, TransportError};
use async_trait::async_trait;
use patrimony_config::ClientConfig;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::Other(format!("failed to create HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(
            config.api_url.clone(),
            config.http_timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(field) => {
                let mut part = Part::bytes(field.file.bytes).file_name(field.file.file_name);
                if let Some(content_type) = field.file.content_type {
                    part = part
                        .mime_str(&content_type)
                        .map_err(|err| TransportError::Request(err.to_string()))?;
                }
                builder.multipart(Form::new().part(field.name, part))
            }
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let body = response.text().await.map_err(classify)?;
        Ok(RawResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else if err.is_builder() {
        TransportError::Request(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}
