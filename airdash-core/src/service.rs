use async_trait::async_trait;
use reqwest::{Client, Request};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    error::ServiceError,
    model::{DashboardResponse, HealthStatus, Query},
};

/// Backend that produces precomputed dashboard snapshots.
#[async_trait]
pub trait DashboardService: Send + Sync + Debug {
    async fn fetch_dashboard(&self, query: &Query) -> Result<DashboardResponse, ServiceError>;

    async fn health(&self) -> Result<HealthStatus, ServiceError>;
}

/// `DashboardService` over HTTP: `GET {base}/api/dashboard?lat=..&lon=..`.
#[derive(Debug, Clone)]
pub struct HttpDashboardService {
    base_url: String,
    http: Client,
}

impl HttpDashboardService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn dashboard_request(&self, query: &Query) -> Result<Request, ServiceError> {
        self.http
            .get(format!("{}/api/dashboard", self.base_url))
            .query(&[("lat", query.latitude), ("lon", query.longitude)])
            .build()
            .map_err(ServiceError::Transport)
    }

    fn health_request(&self) -> Result<Request, ServiceError> {
        self.http
            .get(format!("{}/api/health", self.base_url))
            .build()
            .map_err(ServiceError::Transport)
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T, ServiceError> {
        debug!(url = %request.url(), "sending dashboard service request");

        let res = self.http.execute(request).await.map_err(ServiceError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(ServiceError::Transport)?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "dashboard service responded");

        serde_json::from_str(&body).map_err(ServiceError::Decode)
    }
}

#[async_trait]
impl DashboardService for HttpDashboardService {
    async fn fetch_dashboard(&self, query: &Query) -> Result<DashboardResponse, ServiceError> {
        let request = self.dashboard_request(query)?;
        self.execute(request).await
    }

    async fn health(&self) -> Result<HealthStatus, ServiceError> {
        let request = self.health_request()?;
        self.execute(request).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
