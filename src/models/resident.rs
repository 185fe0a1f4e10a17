//! Resident (host) model

use serde::{Deserialize, Serialize};

/// Resident of the condominium. Read-only reference data for the visitor forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    /// Housing units the resident is associated with
    #[serde(default)]
    pub viviendas: Vec<ResidentUnit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentUnit {
    pub codigo_unidad: String,
    #[serde(default)]
    pub condominio: String,
}

impl Resident {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_string()
    }

    /// Label used in host pickers: name followed by the first unit, if any
    pub fn display_label(&self) -> String {
        match self.viviendas.first() {
            Some(unit) if unit.condominio.is_empty() => {
                format!("{} ({})", self.full_name(), unit.codigo_unidad)
            }
            Some(unit) => format!(
                "{} ({} - {})",
                self.full_name(),
                unit.codigo_unidad,
                unit.condominio
            ),
            None => self.full_name(),
        }
    }
}

/// The resident listing comes back either paginated or as a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResidentListing {
    Paginated { results: Vec<Resident> },
    Bare(Vec<Resident>),
}

impl ResidentListing {
    pub fn into_residents(self) -> Vec<Resident> {
        match self {
            ResidentListing::Paginated { results } => results,
            ResidentListing::Bare(residents) => residents,
        }
    }
}
