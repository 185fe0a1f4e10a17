//! Report pages

use axum::response::Html;

use crate::{
    models::report::{CommonAreasReport, FinancialReport, VisualReport},
    views::{
        reports::{
            common_area_cards, common_area_charts, financial_cards, payment_distribution_chart,
            visual_charts, BarChart, ReportView, SummaryCard,
        },
        shell::NavigationShell,
    },
};

use super::{escape, layout};

fn cards(cards: &[SummaryCard]) -> String {
    let items: String = cards
        .iter()
        .map(|card| {
            format!(
                r#"<div class="card"><div class="title">{}</div><div class="value">{}</div></div>"#,
                escape(card.title),
                escape(&card.value)
            )
        })
        .collect();
    format!(r#"<section class="cards">{}</section>"#, items)
}

fn chart(chart: &BarChart) -> String {
    let content = if chart.is_empty() {
        r#"<p class="empty">Sin datos para mostrar.</p>"#.to_string()
    } else {
        chart
            .bars
            .iter()
            .map(|bar| {
                format!(
                    r#"<div class="bar-row"><span class="bar-label">{}</span><span class="bar-track"><span class="bar" style="display:block;width:{}%"></span></span><span class="bar-value">{}</span></div>"#,
                    escape(&bar.label),
                    bar.width_pct,
                    escape(&bar.display)
                )
            })
            .collect()
    };
    format!(
        r#"<section class="chart"><h2>{}</h2>{}</section>"#,
        escape(chart.title),
        content
    )
}

/// Loading placeholder, failure message, or the rendered report
fn report_body<T>(view: &ReportView<T>, render: impl FnOnce(&T) -> String) -> String {
    match view {
        ReportView::Loading => r#"<p class="loading">Cargando reporte...</p>"#.to_string(),
        ReportView::Failed(message) => layout::alert("error", Some(message.as_str())),
        ReportView::Ready(report) => render(report),
    }
}

pub fn financial_page(shell: &NavigationShell, view: &ReportView<FinancialReport>) -> Html<String> {
    let body = report_body(view, |report| {
        format!(
            "{}{}",
            cards(&financial_cards(report)),
            chart(&payment_distribution_chart(report))
        )
    });
    layout::page(shell, "Reporte financiero", &body)
}

pub fn common_areas_page(
    shell: &NavigationShell,
    view: &ReportView<CommonAreasReport>,
    condominio_id: Option<i64>,
) -> Html<String> {
    let scope = format!(
        r#"<form method="get" action="/reportes/areas-comunes" class="filters">
<label for="condominio_id">Condominio</label>
<input id="condominio_id" name="condominio_id" type="number" min="1" value="{}">
<button type="submit">Filtrar</button>
</form>"#,
        condominio_id.map(|id| id.to_string()).unwrap_or_default()
    );

    let body = report_body(view, |report| {
        let charts: String = common_area_charts(report).iter().map(chart).collect();
        format!("{}{}", cards(&common_area_cards(report)), charts)
    });
    layout::page(shell, "Reporte de áreas comunes", &format!("{}{}", scope, body))
}

pub fn visual_page(shell: &NavigationShell, view: &ReportView<VisualReport>) -> Html<String> {
    let body = report_body(view, |report| visual_charts(report).iter().map(chart).collect());
    layout::page(shell, "Reporte visual", &body)
}
