//! Downloadable exports of the visitor list.
//!
//! Exports cover the current page only. The export handlers re-fetch the page named by the
//! list query (page, search and filters) and flatten exactly those rows.

pub mod document;
pub mod spreadsheet;

use chrono::Local;

use crate::models::visitor::Visitor;

pub const SPREADSHEET_FILENAME: &str = "visitantes.csv";
pub const DOCUMENT_FILENAME: &str = "visitantes.pdf";

pub const HEADERS: [&str; 8] = [
    "Nombre",
    "Documento",
    "Teléfono",
    "Motivo",
    "Anfitrión",
    "Placa",
    "Entrada",
    "Salida",
];

const DISPLAY_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Flattened, display-ready visitor row
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub cells: [String; 8],
}

impl From<&Visitor> for ExportRow {
    fn from(v: &Visitor) -> Self {
        let local = |t: chrono::DateTime<chrono::Utc>| {
            t.with_timezone(&Local).format(DISPLAY_TIME_FORMAT).to_string()
        };

        Self {
            cells: [
                v.nombre.clone(),
                v.documento_identidad.clone(),
                v.telefono.clone().unwrap_or_default(),
                v.motivo_visita.to_string(),
                v.host_label(),
                v.placa_vehiculo.clone().unwrap_or_default(),
                local(v.fecha_entrada),
                v.fecha_salida
                    .map(local)
                    .unwrap_or_else(|| "En el condominio".to_string()),
            ],
        }
    }
}

pub fn rows(visitors: &[Visitor]) -> Vec<ExportRow> {
    visitors.iter().map(ExportRow::from).collect()
}
