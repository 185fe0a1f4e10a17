//! Visitor registry pages

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Local;
use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};

use crate::{
    error::{AppError, AppResult},
    export::{self, spreadsheet, DOCUMENT_FILENAME, SPREADSHEET_FILENAME},
    models::visitor::{VisitorListQuery, FILTER_REASON, FILTER_STATUS},
    render::{self, visitors::{form_page, list_page}},
    services::ReferenceData,
    views::{
        visitor_form::{FormMode, SubmitOutcome, VisitorForm, VisitorFormView},
        visitor_list::{Modal, VisitorListView},
    },
    AppState,
};

use super::ViewportWidth;

const LIST_PATH: &str = "/visitantes";

/// Query string of the list page and of everything that returns to it
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    #[serde_as(as = "NoneAsEmptyString")]
    pub page: Option<u64>,
    pub search: String,
    pub motivo_visita: String,
    pub estado: String,
    pub modal: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    pub id: Option<i64>,
}

impl ListParams {
    pub fn to_query(&self) -> VisitorListQuery {
        let mut query = VisitorListQuery {
            page: self.page.unwrap_or(1).max(1),
            search: self.search.trim().to_string(),
            ..Default::default()
        };
        for (key, value) in [(FILTER_REASON, &self.motivo_visita), (FILTER_STATUS, &self.estado)] {
            if !value.trim().is_empty() {
                query.filters.insert(key.to_string(), value.trim().to_string());
            }
        }
        query
    }

    pub fn modal(&self) -> Option<Modal> {
        Modal::from_query(self.modal.as_deref()?, self.id?)
    }

    /// List URL for these params, without any modal
    fn list_location(&self) -> String {
        render::href(LIST_PATH, &self.to_query().to_pairs())
    }
}

/// Fetch the page of visitors described by the params
async fn load_list(state: &AppState, params: &ListParams) -> AppResult<VisitorListView> {
    let mut view = VisitorListView::new(params.to_query());
    let request = view.begin_fetch();
    let page = state.services.visitors.list(&request.query).await?;
    view.apply(request.generation, page);
    Ok(view)
}

pub async fn index() -> Redirect {
    Redirect::to(LIST_PATH)
}

/// Visitor list, with an optional modal opened on one of its rows
pub async fn list_visitors(
    State(state): State<AppState>,
    viewport: ViewportWidth,
    Query(params): Query<ListParams>,
) -> AppResult<Html<String>> {
    let mut view = load_list(&state, &params).await?;

    if let Some(modal) = params.modal() {
        if !view.open_modal(modal) {
            tracing::debug!(
                "Ignoring {} modal for visitor {} not available on this page",
                modal.query_name(),
                modal.visitor_id()
            );
        }
    }

    Ok(list_page(&viewport.shell(LIST_PATH), &view, None))
}

/// Current page as CSV
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let view = load_list(&state, &params).await?;
    let rows = export::rows(view.visitors());
    let body = spreadsheet::to_csv(&rows);

    tracing::info!("Exported {} visitors as CSV", rows.len());
    Ok(attachment("text/csv; charset=utf-8", SPREADSHEET_FILENAME, body.into_bytes()))
}

/// Current page as PDF
pub async fn export_pdf(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let view = load_list(&state, &params).await?;
    let rows = export::rows(view.visitors());
    let count = rows.len();
    let exporter = state.exporter.clone();

    let body = tokio::task::spawn_blocking(move || exporter.render(&rows, Local::now()))
        .await
        .map_err(|e| AppError::Internal(format!("PDF task failed: {}", e)))??;

    tracing::info!("Exported {} visitors as PDF", count);
    Ok(attachment("application/pdf", DOCUMENT_FILENAME, body))
}

fn attachment(content_type: &'static str, filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

pub async fn new_visitor_form(
    State(state): State<AppState>,
    viewport: ViewportWidth,
) -> Html<String> {
    let residents = state.services.residents.load_reference().await;
    let view = VisitorFormView::new(FormMode::Create, VisitorForm::blank(Local::now()), residents);
    form_page(&viewport.shell("/visitantes/nuevo"), &view)
}

pub async fn create_visitor(
    State(state): State<AppState>,
    viewport: ViewportWidth,
    Form(form): Form<VisitorForm>,
) -> Response {
    submit_form(&state, viewport, FormMode::Create, form).await
}

/// Edit form; the record and the resident list load concurrently
pub async fn edit_visitor_form(
    State(state): State<AppState>,
    viewport: ViewportWidth,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let (visitor, residents) = tokio::join!(
        state.services.visitors.get(id),
        state.services.residents.load_reference()
    );
    let visitor = visitor?;

    let view = VisitorFormView::new(FormMode::Edit(id), VisitorForm::from_visitor(&visitor), residents);
    Ok(form_page(&viewport.shell(&edit_path(id)), &view))
}

pub async fn update_visitor(
    State(state): State<AppState>,
    viewport: ViewportWidth,
    Path(id): Path<i64>,
    Form(form): Form<VisitorForm>,
) -> Response {
    submit_form(&state, viewport, FormMode::Edit(id), form).await
}

fn edit_path(id: i64) -> String {
    format!("/visitantes/{}/editar", id)
}

/// Save and go back to the list, or re-render the form with the values kept and the error
/// inline. The resident list is only needed for the re-render.
async fn submit_form(
    state: &AppState,
    viewport: ViewportWidth,
    mode: FormMode,
    form: VisitorForm,
) -> Response {
    let mut view = VisitorFormView::new(mode, form, ReferenceData::Loaded(Vec::new()));

    match view.submit(&state.services.visitors).await {
        SubmitOutcome::Saved(_) => Redirect::to(LIST_PATH).into_response(),
        SubmitOutcome::Rejected => {
            let (residents, warning) = state.services.residents.load_reference().await.into_parts();
            view.residents = residents;
            view.residents_warning = warning;

            let path = match mode {
                FormMode::Create => "/visitantes/nuevo".to_string(),
                FormMode::Edit(id) => edit_path(id),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, form_page(&viewport.shell(&path), &view)).into_response()
        }
    }
}

/// Record the exit, then return to the same list page
pub async fn check_out_visitor(
    State(state): State<AppState>,
    viewport: ViewportWidth,
    Path(id): Path<i64>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let result = state.services.visitors.check_out(id).await.map(|_| ());
    after_mutation(&state, viewport, &params, result).await
}

pub async fn delete_visitor(
    State(state): State<AppState>,
    viewport: ViewportWidth,
    Path(id): Path<i64>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let result = state.services.visitors.delete(id).await;
    after_mutation(&state, viewport, &params, result).await
}

/// List URL to return to after a mutation. The page is clamped to the pages left once
/// the mutated row is gone or filtered out.
async fn surviving_list_location(state: &AppState, params: &ListParams) -> String {
    let target = params.to_query();
    if target.page <= 1 {
        return params.list_location();
    }

    let mut view = VisitorListView::new(VisitorListQuery { page: 1, ..target.clone() });
    let request = view.begin_fetch();
    match state.services.visitors.list(&request.query).await {
        Ok(page) => {
            view.apply(request.generation, page);
        }
        Err(e) => {
            tracing::warn!("Could not recount visitors after mutation: {}", e);
            return params.list_location();
        }
    }

    if view.set_page(target.page).is_none() {
        let last = view.total_pages().max(1);
        tracing::debug!("Page {} is gone, returning to page {}", target.page, last);
        view.set_page(last);
    }
    render::href(LIST_PATH, &view.query().to_pairs())
}

/// Redirect to the list on success. On failure the list is shown again with the message
/// inline and no modal open.
async fn after_mutation(
    state: &AppState,
    viewport: ViewportWidth,
    params: &ListParams,
    result: AppResult<()>,
) -> AppResult<Response> {
    let err = match result {
        Ok(()) => return Ok(Redirect::to(&surviving_list_location(state, params).await).into_response()),
        Err(e) => e,
    };

    tracing::warn!("Visitor mutation failed: {}", err);
    let view = load_list(state, params).await?;
    let message = err.user_message();
    Ok((
        err.status_code(),
        list_page(&viewport.shell(LIST_PATH), &view, Some(&message)),
    )
        .into_response())
}
