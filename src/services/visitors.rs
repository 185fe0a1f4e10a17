//! Visitor registry service

use std::sync::Arc;

use serde_json::Value;

use crate::{
    client::Transport,
    error::{AppError, AppResult},
    models::visitor::{Paginated, Visitor, VisitorListQuery, VisitorPayload},
};

const VISITORS_PATH: &str = "visitantes/";

fn visitor_path(id: i64) -> String {
    format!("{}{}/", VISITORS_PATH, id)
}

#[derive(Clone)]
pub struct VisitorsService {
    transport: Arc<dyn Transport>,
}

impl VisitorsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// One page of visitors matching the search term and filters
    pub async fn list(&self, query: &VisitorListQuery) -> AppResult<Paginated<Visitor>> {
        let body = self.transport.get(VISITORS_PATH, &query.to_pairs()).await?;
        let page: Paginated<Visitor> = serde_json::from_value(body)?;

        for visitor in page.results.iter().filter(|v| !v.has_consistent_timestamps()) {
            tracing::warn!(
                "Visitor {} has an exit timestamp before its entry timestamp",
                visitor.id
            );
        }

        tracing::debug!(
            "Loaded {} visitors (page {}, total {})",
            page.results.len(),
            query.page,
            page.count
        );
        Ok(page)
    }

    /// Get a visitor by ID
    pub async fn get(&self, id: i64) -> AppResult<Visitor> {
        let body = self.transport.get(&visitor_path(id), &[]).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Register a new visitor
    pub async fn create(&self, payload: &VisitorPayload) -> AppResult<Visitor> {
        let body = self
            .transport
            .post(VISITORS_PATH, Some(serde_json::to_value(payload)?))
            .await?;
        let visitor: Visitor = serde_json::from_value(body)?;

        tracing::info!("Registered visitor {} ({})", visitor.id, visitor.nombre);
        Ok(visitor)
    }

    /// Replace a visitor record, keeping its identity
    pub async fn update(&self, id: i64, payload: &VisitorPayload) -> AppResult<Visitor> {
        let body = self
            .transport
            .put(&visitor_path(id), serde_json::to_value(payload)?)
            .await?;
        let visitor: Visitor = serde_json::from_value(body)?;

        tracing::info!("Updated visitor {}", id);
        Ok(visitor)
    }

    /// Delete a visitor record
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.transport.delete(&visitor_path(id)).await?;
        tracing::info!("Deleted visitor {}", id);
        Ok(())
    }

    /// Record the visitor's exit. The backend stamps the exit time.
    pub async fn check_out(&self, id: i64) -> AppResult<Visitor> {
        let path = format!("{}registrar-salida/", visitor_path(id));
        let body = self.transport.post(&path, None).await?;

        if body == Value::Null {
            // Some deployments answer 204; read the record back
            return self.get(id).await;
        }

        let visitor: Visitor = serde_json::from_value(body)?;
        if visitor.fecha_salida.is_none() {
            return Err(AppError::Internal(format!(
                "Checkout of visitor {} returned no exit timestamp",
                id
            )));
        }

        tracing::info!("Visitor {} checked out", id);
        Ok(visitor)
    }
}
