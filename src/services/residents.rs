//! Resident listing, used as reference data by the visitor forms

use std::sync::Arc;

use crate::{
    client::Transport,
    error::AppResult,
    models::resident::{Resident, ResidentListing},
};

use super::ReferenceData;

const RESIDENTS_PATH: &str = "residentes/";

#[derive(Clone)]
pub struct ResidentsService {
    transport: Arc<dyn Transport>,
}

impl ResidentsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch every resident the current user can pick as host
    pub async fn list(&self) -> AppResult<Vec<Resident>> {
        let body = self.transport.get(RESIDENTS_PATH, &[]).await?;
        let listing: ResidentListing = serde_json::from_value(body)?;
        Ok(listing.into_residents())
    }

    /// Load residents for a host picker; a failure degrades to an empty list.
    pub async fn load_reference(&self) -> ReferenceData<Vec<Resident>> {
        match self.list().await {
            Ok(residents) => ReferenceData::Loaded(residents),
            Err(e) => {
                tracing::warn!("Could not load residents, continuing with an empty list: {}", e);
                ReferenceData::Degraded {
                    fallback: Vec::new(),
                    message: format!(
                        "No se pudo cargar la lista de residentes: {}",
                        e.user_message()
                    ),
                }
            }
        }
    }
}
