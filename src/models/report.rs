//! Report payloads. Pre-aggregated by the backend and displayed as-is.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `reportes/financieros/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialReport {
    pub ingresos_totales: Decimal,
    pub ingresos_mes_actual: Decimal,
    pub morosidad_total: Decimal,
    /// Already a percentage (0-100)
    pub porcentaje_morosidad: Decimal,
    pub residentes_morosos: i64,
    pub distribucion_pagos: Vec<PaymentShare>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentShare {
    pub categoria: String,
    pub cantidad: i64,
    pub monto: Decimal,
    pub porcentaje: Decimal,
}

/// `reportes/areas-comunes/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonAreasReport {
    pub total_reservas: i64,
    pub ingresos_totales: Decimal,
    pub areas: Vec<AreaUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaUsage {
    pub area: String,
    pub reservas: i64,
    pub ingresos: Decimal,
}

/// `reportes/visuales/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualReport {
    pub ingresos_mensuales: Vec<MonthlyAmount>,
    pub morosidad_mensual: Vec<MonthlyAmount>,
    pub reservas_por_area: Vec<AreaCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyAmount {
    pub mes: String,
    pub monto: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaCount {
    pub area: String,
    pub total: i64,
}
