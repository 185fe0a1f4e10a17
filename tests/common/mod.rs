//! Shared helpers for the dashboard integration tests: an in-memory backend behind the
//! `Transport` seam, the router built the same way `main.rs` builds it, and request helpers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, Response},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use condo_admin::{
    api, client::Transport, config::AppConfig, error::AppResult, AppError, AppState,
};

const PAGE_SIZE: usize = 10;

/// In-memory stand-in for the condominium REST API. Records every call as `"METHOD path"`
/// and the query of every visitor list fetch.
pub struct FakeBackend {
    visitors: Mutex<Vec<Value>>,
    residents: Mutex<Option<Vec<Value>>>,
    calls: Mutex<Vec<String>>,
    list_queries: Mutex<Vec<Vec<(String, String)>>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            visitors: Mutex::new(Vec::new()),
            residents: Mutex::new(Some(vec![
                json!({"id": 3, "nombre": "Laura", "apellido": "Gómez",
                       "viviendas": [{"codigo_unidad": "A-101", "condominio": "Los Pinos"}]}),
                json!({"id": 4, "nombre": "Carlos", "apellido": "Ruiz", "viviendas": []}),
            ])),
            calls: Mutex::new(Vec::new()),
            list_queries: Mutex::new(Vec::new()),
        })
    }

    /// Backend with `count` visitors; odd ids are still inside, even ids have left.
    pub fn with_visitors(count: i64) -> Arc<Self> {
        let backend = Self::new();
        {
            let mut visitors = backend.visitors.lock().unwrap();
            for id in 1..=count {
                visitors.push(visitor_json(id, id % 2 == 0));
            }
        }
        backend
    }

    /// Make `residentes/` fail from now on
    pub fn break_residents(&self) {
        *self.residents.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Query pairs of each `visitantes/` list fetch, oldest first
    pub fn list_queries(&self) -> Vec<Vec<(String, String)>> {
        self.list_queries.lock().unwrap().clone()
    }

    pub fn visitor(&self, id: i64) -> Option<Value> {
        self.visitors
            .lock()
            .unwrap()
            .iter()
            .find(|v| v["id"] == id)
            .cloned()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn not_found() -> AppError {
        AppError::from_api_response(404, r#"{"detail": "No encontrado."}"#)
    }

    fn list(&self, query: &[(String, String)]) -> AppResult<Value> {
        self.list_queries.lock().unwrap().push(query.to_vec());
        let param = |key: &str| {
            query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        let page: usize = param("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let search = param("search").unwrap_or("").to_lowercase();

        let matching: Vec<Value> = self
            .visitors
            .lock()
            .unwrap()
            .iter()
            .filter(|v| {
                search.is_empty()
                    || v["nombre"].as_str().unwrap_or("").to_lowercase().contains(&search)
            })
            .filter(|v| param("motivo_visita").map_or(true, |m| v["motivo_visita"] == m))
            .filter(|v| match param("estado") {
                Some("dentro") => v["fecha_salida"].is_null(),
                Some("salio") => !v["fecha_salida"].is_null(),
                _ => true,
            })
            .cloned()
            .collect();

        let start = (page - 1) * PAGE_SIZE;
        if page > 1 && start >= matching.len() {
            return Err(AppError::from_api_response(404, r#"{"detail": "Página inválida."}"#));
        }
        let results: Vec<Value> = matching.iter().skip(start).take(PAGE_SIZE).cloned().collect();
        Ok(json!({"count": matching.len(), "results": results}))
    }
}

fn visitor_json(id: i64, left: bool) -> Value {
    json!({
        "id": id,
        "nombre": format!("Visitante {}", id),
        "documento_identidad": format!("10{:04}", id),
        "telefono": null,
        "motivo_visita": if id % 3 == 0 { "reunion" } else { "visita_familiar" },
        "anfitrion": 3,
        "placa_vehiculo": null,
        "fecha_entrada": "2024-01-01T08:00:00Z",
        "fecha_salida": if left { json!("2024-01-01T10:00:00Z") } else { Value::Null },
    })
}

/// `visitantes/12/registrar-salida/` -> `(12, "registrar-salida")`
fn split_visitor_path(path: &str) -> Option<(i64, &str)> {
    let rest = path.strip_prefix("visitantes/")?.trim_end_matches('/');
    let (id, action) = rest.split_once('/').unwrap_or((rest, ""));
    Some((id.parse().ok()?, action))
}

#[async_trait]
impl Transport for FakeBackend {
    async fn get(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        self.record(format!("GET {}", path));
        match path {
            "visitantes/" => self.list(query),
            "residentes/" => match self.residents.lock().unwrap().clone() {
                Some(residents) => Ok(json!({"count": residents.len(), "results": residents})),
                None => Err(AppError::from_api_response(503, r#"{"message": "Servicio no disponible"}"#)),
            },
            "reportes/financieros/" => Ok(json!({
                "ingresos_totales": "15200.50",
                "ingresos_mes_actual": "3200.00",
                "morosidad_total": "830.00",
                "porcentaje_morosidad": 12.5,
                "residentes_morosos": 4,
                "distribucion_pagos": [
                    {"categoria": "Al día", "cantidad": 40, "monto": "12000.00", "porcentaje": 80},
                    {"categoria": "Morosos", "cantidad": 10, "monto": "3200.50", "porcentaje": 20}
                ]
            })),
            "reportes/areas-comunes/" => Ok(json!({
                "total_reservas": 15,
                "ingresos_totales": "500.00",
                "areas": [
                    {"area": "Piscina", "reservas": 10, "ingresos": "400.00"},
                    {"area": "BBQ", "reservas": 5, "ingresos": "100.00"}
                ]
            })),
            "reportes/visuales/" => Err(AppError::from_api_response(
                500,
                r#"{"detail": "Reporte no disponible"}"#,
            )),
            _ => {
                let (id, _) = split_visitor_path(path).ok_or_else(Self::not_found)?;
                self.visitor(id).ok_or_else(Self::not_found)
            }
        }
    }

    async fn post(&self, path: &str, body: Option<Value>) -> AppResult<Value> {
        self.record(format!("POST {}", path));

        if path == "visitantes/" {
            let body = body.unwrap_or(Value::Null);
            let mut visitors = self.visitors.lock().unwrap();
            let id = visitors.iter().filter_map(|v| v["id"].as_i64()).max().unwrap_or(0) + 1;
            let created = json!({
                "id": id,
                "nombre": body["nombre"],
                "documento_identidad": body["documento_identidad"],
                "telefono": body["telefono"],
                "motivo_visita": body["motivo_visita"],
                "anfitrion": body["anfitrion_id"],
                "placa_vehiculo": body["placa_vehiculo"],
                "fecha_entrada": body["fecha_entrada"],
                "fecha_salida": null,
            });
            visitors.push(created.clone());
            return Ok(created);
        }

        let (id, action) = split_visitor_path(path).ok_or_else(Self::not_found)?;
        if action != "registrar-salida" {
            return Err(Self::not_found());
        }

        let mut visitors = self.visitors.lock().unwrap();
        let visitor = visitors
            .iter_mut()
            .find(|v| v["id"] == id)
            .ok_or_else(Self::not_found)?;
        if !visitor["fecha_salida"].is_null() {
            return Err(AppError::from_api_response(
                400,
                r#"{"detail": "El visitante ya registró su salida."}"#,
            ));
        }
        visitor["fecha_salida"] = json!(Utc::now().to_rfc3339());
        Ok(visitor.clone())
    }

    async fn put(&self, path: &str, body: Value) -> AppResult<Value> {
        self.record(format!("PUT {}", path));
        let (id, _) = split_visitor_path(path).ok_or_else(Self::not_found)?;

        let mut visitors = self.visitors.lock().unwrap();
        let visitor = visitors
            .iter_mut()
            .find(|v| v["id"] == id)
            .ok_or_else(Self::not_found)?;
        for key in ["nombre", "documento_identidad", "telefono", "motivo_visita", "placa_vehiculo", "fecha_entrada"] {
            visitor[key] = body[key].clone();
        }
        visitor["anfitrion"] = body["anfitrion_id"].clone();
        Ok(visitor.clone())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.record(format!("DELETE {}", path));
        let (id, _) = split_visitor_path(path).ok_or_else(Self::not_found)?;

        let mut visitors = self.visitors.lock().unwrap();
        let before = visitors.len();
        visitors.retain(|v| v["id"] != id);
        if visitors.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

/// Full application router over the fake backend, as `main.rs` builds it
pub fn build_test_app(backend: Arc<FakeBackend>) -> Router {
    let mut config = AppConfig::default();
    config.export.font_dir = "/nonexistent/fonts".to_string();
    api::create_router(AppState::new(config, backend))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_with_header(app: Router, uri: &str, name: &str, value: &str) -> Response<Body> {
    app.oneshot(
        Request::get(uri)
            .header(name, value)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
