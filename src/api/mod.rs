//! HTTP handlers for the dashboard pages

pub mod health;
pub mod reports;
pub mod visitors;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::{views::shell::NavigationShell, AppState};

/// Client hint carrying the layout viewport width in CSS pixels
pub const VIEWPORT_WIDTH_HINT: &str = "sec-ch-viewport-width";

/// Viewport width reported by the browser, when it sends the client hint
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportWidth(pub Option<u32>);

impl ViewportWidth {
    /// Navigation shell for a page, narrowed to one presentation when the width is known
    pub fn shell(&self, path: &str) -> NavigationShell {
        NavigationShell::for_page(path).with_viewport(self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ViewportWidth
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let width = parts
            .headers
            .get(VIEWPORT_WIDTH_HINT)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|width| width.is_finite() && *width > 0.0)
            .map(|width| width.round() as u32);

        Ok(ViewportWidth(width))
    }
}

/// Create the dashboard router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/", get(visitors::index))
        // Visitors
        .route("/visitantes", get(visitors::list_visitors))
        .route("/visitantes/exportar.csv", get(visitors::export_csv))
        .route("/visitantes/exportar.pdf", get(visitors::export_pdf))
        .route(
            "/visitantes/nuevo",
            get(visitors::new_visitor_form).post(visitors::create_visitor),
        )
        .route(
            "/visitantes/:id/editar",
            get(visitors::edit_visitor_form).post(visitors::update_visitor),
        )
        .route("/visitantes/:id/salida", post(visitors::check_out_visitor))
        .route("/visitantes/:id/eliminar", post(visitors::delete_visitor))
        // Reports
        .route("/reportes/financieros", get(reports::financial))
        .route("/reportes/areas-comunes", get(reports::common_areas))
        .route("/reportes/visuales", get(reports::visual))
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("accept-ch"),
            HeaderValue::from_static("Sec-CH-Viewport-Width"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
