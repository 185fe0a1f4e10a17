//! Typed operations over the backend resources

pub mod reports;
pub mod residents;
pub mod visitors;

use std::sync::Arc;

use crate::client::Transport;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub visitors: visitors::VisitorsService,
    pub residents: residents::ResidentsService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services sharing the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            visitors: visitors::VisitorsService::new(transport.clone()),
            residents: residents::ResidentsService::new(transport.clone()),
            reports: reports::ReportsService::new(transport),
        }
    }
}

/// Outcome of loading reference data that a page can live without.
///
/// A failed load does not fail the page: it degrades to a fallback value and carries the
/// message to show next to the affected control.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceData<T> {
    Loaded(T),
    Degraded { fallback: T, message: String },
}

impl<T> ReferenceData<T> {
    pub fn value(&self) -> &T {
        match self {
            ReferenceData::Loaded(value) => value,
            ReferenceData::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            ReferenceData::Loaded(_) => None,
            ReferenceData::Degraded { message, .. } => Some(message),
        }
    }

    pub fn into_parts(self) -> (T, Option<String>) {
        match self {
            ReferenceData::Loaded(value) => (value, None),
            ReferenceData::Degraded { fallback, message } => (fallback, Some(message)),
        }
    }
}
