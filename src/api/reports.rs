//! Report pages. A failed fetch renders inside the page rather than as an error page.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};

use crate::{
    render::reports::{common_areas_page, financial_page, visual_page},
    views::reports::ReportView,
    AppState,
};

use super::ViewportWidth;

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommonAreasParams {
    #[serde_as(as = "NoneAsEmptyString")]
    pub condominio_id: Option<i64>,
}

pub async fn financial(State(state): State<AppState>, viewport: ViewportWidth) -> Html<String> {
    let view = ReportView::from_result(state.services.reports.financial().await);
    financial_page(&viewport.shell("/reportes/financieros"), &view)
}

pub async fn common_areas(
    State(state): State<AppState>,
    viewport: ViewportWidth,
    Query(params): Query<CommonAreasParams>,
) -> Html<String> {
    let view = ReportView::from_result(state.services.reports.common_areas(params.condominio_id).await);
    common_areas_page(&viewport.shell("/reportes/areas-comunes"), &view, params.condominio_id)
}

pub async fn visual(State(state): State<AppState>, viewport: ViewportWidth) -> Html<String> {
    let view = ReportView::from_result(state.services.reports.visual().await);
    visual_page(&viewport.shell("/reportes/visuales"), &view)
}
