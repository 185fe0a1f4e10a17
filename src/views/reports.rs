//! Report view state and display formatting.
//!
//! Figures come pre-computed from the backend; nothing here aggregates. Formatting is
//! display-only.

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

use crate::{
    error::AppResult,
    models::report::{CommonAreasReport, FinancialReport, VisualReport},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ReportView<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ReportView<T> {
    pub fn from_result(result: AppResult<T>) -> Self {
        match result {
            Ok(report) => ReportView::Ready(report),
            Err(e) => {
                tracing::error!("Report fetch failed: {}", e);
                ReportView::Failed(e.user_message())
            }
        }
    }
}

/// Headline figure
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
}

/// Horizontal bar chart, one bar per point, widths relative to the largest value
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub display: String,
    /// 0-100
    pub width_pct: u32,
}

impl BarChart {
    fn build(
        title: &'static str,
        points: impl IntoIterator<Item = (String, Decimal, String)>,
    ) -> Self {
        let points: Vec<_> = points.into_iter().collect();
        let max = points
            .iter()
            .map(|(_, value, _)| *value)
            .max()
            .unwrap_or(Decimal::ZERO);

        let bars = points
            .into_iter()
            .map(|(label, value, display)| {
                let width_pct = if max > Decimal::ZERO && value > Decimal::ZERO {
                    (value * Decimal::from(100) / max)
                        .round()
                        .to_u32()
                        .unwrap_or(0)
                } else {
                    0
                };
                Bar { label, display, width_pct }
            })
            .collect();

        Self { title, bars }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// `$ 1,234,567.50`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}$ {}.{}", sign, grouped, frac_part)
}

/// Value already expressed as a percentage, e.g. `12.5` -> `12.5%`
pub fn format_percentage(value: Decimal) -> String {
    format!("{}%", value.round_dp(1).normalize())
}

pub fn financial_cards(report: &FinancialReport) -> Vec<SummaryCard> {
    vec![
        SummaryCard { title: "Ingresos totales", value: format_currency(report.ingresos_totales) },
        SummaryCard { title: "Ingresos del mes", value: format_currency(report.ingresos_mes_actual) },
        SummaryCard { title: "Morosidad total", value: format_currency(report.morosidad_total) },
        SummaryCard { title: "Porcentaje de morosidad", value: format_percentage(report.porcentaje_morosidad) },
        SummaryCard { title: "Residentes morosos", value: report.residentes_morosos.to_string() },
    ]
}

pub fn payment_distribution_chart(report: &FinancialReport) -> BarChart {
    BarChart::build(
        "Distribución de pagos",
        report.distribucion_pagos.iter().map(|share| {
            (
                share.categoria.clone(),
                share.monto,
                format!(
                    "{} ({} pagos, {})",
                    format_currency(share.monto),
                    share.cantidad,
                    format_percentage(share.porcentaje)
                ),
            )
        }),
    )
}

pub fn common_area_cards(report: &CommonAreasReport) -> Vec<SummaryCard> {
    vec![
        SummaryCard { title: "Reservas totales", value: report.total_reservas.to_string() },
        SummaryCard { title: "Ingresos por reservas", value: format_currency(report.ingresos_totales) },
        SummaryCard { title: "Áreas con reservas", value: report.areas.len().to_string() },
    ]
}

pub fn common_area_charts(report: &CommonAreasReport) -> Vec<BarChart> {
    vec![
        BarChart::build(
            "Reservas por área",
            report.areas.iter().map(|a| {
                (a.area.clone(), Decimal::from(a.reservas), a.reservas.to_string())
            }),
        ),
        BarChart::build(
            "Ingresos por área",
            report
                .areas
                .iter()
                .map(|a| (a.area.clone(), a.ingresos, format_currency(a.ingresos))),
        ),
    ]
}

pub fn visual_charts(report: &VisualReport) -> Vec<BarChart> {
    vec![
        BarChart::build(
            "Ingresos mensuales",
            report
                .ingresos_mensuales
                .iter()
                .map(|m| (m.mes.clone(), m.monto, format_currency(m.monto))),
        ),
        BarChart::build(
            "Morosidad mensual",
            report
                .morosidad_mensual
                .iter()
                .map(|m| (m.mes.clone(), m.monto, format_currency(m.monto))),
        ),
        BarChart::build(
            "Reservas por área",
            report
                .reservas_por_area
                .iter()
                .map(|a| (a.area.clone(), Decimal::from(a.total), a.total.to_string())),
        ),
    ]
}
