//! Shared domain enums for visitor records

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ---------------------------------------------------------------------------
// VisitReason
// ---------------------------------------------------------------------------

/// Why a visitor entered the premises. Closed set mirrored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitReason {
    #[default]
    VisitaFamiliar,
    VisitaSocial,
    EntregaPaquete,
    Domicilio,
    ServicioTecnico,
    Mantenimiento,
    TrabajoDomestico,
    Reunion,
    Evento,
    Otro,
}

impl VisitReason {
    pub const ALL: [VisitReason; 10] = [
        VisitReason::VisitaFamiliar,
        VisitReason::VisitaSocial,
        VisitReason::EntregaPaquete,
        VisitReason::Domicilio,
        VisitReason::ServicioTecnico,
        VisitReason::Mantenimiento,
        VisitReason::TrabajoDomestico,
        VisitReason::Reunion,
        VisitReason::Evento,
        VisitReason::Otro,
    ];

    /// Wire value, as sent in payloads and query filters
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitReason::VisitaFamiliar => "visita_familiar",
            VisitReason::VisitaSocial => "visita_social",
            VisitReason::EntregaPaquete => "entrega_paquete",
            VisitReason::Domicilio => "domicilio",
            VisitReason::ServicioTecnico => "servicio_tecnico",
            VisitReason::Mantenimiento => "mantenimiento",
            VisitReason::TrabajoDomestico => "trabajo_domestico",
            VisitReason::Reunion => "reunion",
            VisitReason::Evento => "evento",
            VisitReason::Otro => "otro",
        }
    }
}

impl std::fmt::Display for VisitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VisitReason::VisitaFamiliar => "Visita familiar",
            VisitReason::VisitaSocial => "Visita social",
            VisitReason::EntregaPaquete => "Entrega de paquete",
            VisitReason::Domicilio => "Domicilio",
            VisitReason::ServicioTecnico => "Servicio técnico",
            VisitReason::Mantenimiento => "Mantenimiento",
            VisitReason::TrabajoDomestico => "Trabajo doméstico",
            VisitReason::Reunion => "Reunión",
            VisitReason::Evento => "Evento",
            VisitReason::Otro => "Otro",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for VisitReason {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VisitReason::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Motivo de visita desconocido: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// VisitorStatus
// ---------------------------------------------------------------------------

/// Presence filter for the visitor list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitorStatus {
    /// No exit recorded yet
    Dentro,
    /// Exit recorded
    Salio,
}

impl VisitorStatus {
    pub const ALL: [VisitorStatus; 2] = [VisitorStatus::Dentro, VisitorStatus::Salio];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitorStatus::Dentro => "dentro",
            VisitorStatus::Salio => "salio",
        }
    }
}

impl std::fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VisitorStatus::Dentro => "En el condominio",
            VisitorStatus::Salio => "Salió",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for VisitorStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dentro" => Ok(VisitorStatus::Dentro),
            "salio" => Ok(VisitorStatus::Salio),
            other => Err(AppError::Validation(format!("Estado desconocido: {}", other))),
        }
    }
}
