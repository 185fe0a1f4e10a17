//! Read-only report fetches

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::{
    client::Transport,
    error::AppResult,
    models::report::{CommonAreasReport, FinancialReport, VisualReport},
};

#[derive(Clone)]
pub struct ReportsService {
    transport: Arc<dyn Transport>,
}

impl ReportsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn financial(&self) -> AppResult<FinancialReport> {
        self.fetch("reportes/financieros/", Vec::new()).await
    }

    /// Common-area usage, optionally scoped to one condominium
    pub async fn common_areas(&self, condominio_id: Option<i64>) -> AppResult<CommonAreasReport> {
        let query = condominio_id
            .map(|id| vec![("condominio_id".to_string(), id.to_string())])
            .unwrap_or_default();
        self.fetch("reportes/areas-comunes/", query).await
    }

    pub async fn visual(&self) -> AppResult<VisualReport> {
        self.fetch("reportes/visuales/", Vec::new()).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> AppResult<T> {
        tracing::debug!("Fetching report {}", path);
        let body = self.transport.get(path, &query).await?;
        Ok(serde_json::from_value(body)?)
    }
}
