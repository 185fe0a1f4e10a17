//! Visitor model and related types

use chrono::{DateTime, Duration, FixedOffset, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{enums::VisitReason, resident::Resident};

/// Rows per page on the visitor list. Fixed by the backend.
pub const PAGE_SIZE: u64 = 10;

/// Query keys the visitor list understands as filters
pub const FILTER_REASON: &str = "motivo_visita";
pub const FILTER_STATUS: &str = "estado";

/// Visitor record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visitor {
    pub id: i64,
    pub nombre: String,
    pub documento_identidad: String,
    #[serde(default)]
    pub telefono: Option<String>,
    pub motivo_visita: VisitReason,
    #[serde(default)]
    pub anfitrion: Option<HostRef>,
    #[serde(default)]
    pub placa_vehiculo: Option<String>,
    pub fecha_entrada: DateTime<Utc>,
    /// `None` while the visitor is still on the premises
    #[serde(default)]
    pub fecha_salida: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The host is sent either as a bare resident id or as an embedded resident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HostRef {
    Id(i64),
    Resident(Resident),
}

impl HostRef {
    pub fn id(&self) -> i64 {
        match self {
            HostRef::Id(id) => *id,
            HostRef::Resident(resident) => resident.id,
        }
    }
}

impl Visitor {
    pub fn is_on_premises(&self) -> bool {
        self.fecha_salida.is_none()
    }

    pub fn host_id(&self) -> Option<i64> {
        self.anfitrion.as_ref().map(HostRef::id)
    }

    /// Host name when embedded, otherwise the resident id
    pub fn host_label(&self) -> String {
        match &self.anfitrion {
            Some(HostRef::Resident(resident)) => resident.full_name(),
            Some(HostRef::Id(id)) => format!("Residente #{}", id),
            None => "-".to_string(),
        }
    }

    /// Exit, when present, must not precede entry.
    pub fn has_consistent_timestamps(&self) -> bool {
        match self.fecha_salida {
            Some(exit) => exit >= self.fecha_entrada,
            None => true,
        }
    }

    pub fn time_on_premises(&self) -> Option<Duration> {
        self.fecha_salida.map(|exit| exit - self.fecha_entrada)
    }
}

/// Create / update request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorPayload {
    pub nombre: String,
    pub documento_identidad: String,
    pub telefono: Option<String>,
    pub motivo_visita: VisitReason,
    pub anfitrion_id: i64,
    pub placa_vehiculo: Option<String>,
    pub fecha_entrada: DateTime<FixedOffset>,
}

/// One page of a paginated backend listing
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub count: u64,
}

/// Page count for a total row count, `ceil(count / PAGE_SIZE)`
pub fn total_pages(count: u64) -> u64 {
    count.div_ceil(PAGE_SIZE)
}

/// Parameters of a visitor list fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorListQuery {
    pub page: u64,
    pub search: String,
    /// Open key-value filter set, merged into the query string in insertion order
    pub filters: IndexMap<String, String>,
}

impl Default for VisitorListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            filters: IndexMap::new(),
        }
    }
}

impl VisitorListQuery {
    /// Query pairs sent to the backend. Empty search and empty filter values are omitted.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), self.page.max(1).to_string())];

        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search".to_string(), search.to_string()));
        }

        for (key, value) in &self.filters {
            if !value.trim().is_empty() {
                pairs.push((key.clone(), value.trim().to_string()));
            }
        }

        pairs
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }
}
