//! Condominium administration dashboard
//!
//! Server-rendered pages over the condominium REST backend: the visitor registry
//! (list, search, filters, check-out, create/edit, CSV and PDF export) and the
//! financial, common-area and visual reports.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod render;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use client::Transport;
use export::document::DocumentExporter;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub exporter: DocumentExporter,
}

impl AppState {
    pub fn new(config: AppConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            exporter: DocumentExporter::new(&config.export),
            services: Arc::new(services::Services::new(transport)),
            config: Arc::new(config),
        }
    }
}
