//! Create / edit form for visitor records

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};
use validator::{Validate, ValidationError};

use crate::{
    models::{
        enums::VisitReason,
        resident::Resident,
        visitor::{Visitor, VisitorPayload},
    },
    services::{visitors::VisitorsService, ReferenceData},
};

/// Format of `<input type="datetime-local">`
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Raw form fields, as posted by the browser
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(default)]
pub struct VisitorForm {
    #[validate(custom(function = "not_blank", message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[validate(custom(
        function = "not_blank",
        message = "El documento de identidad es obligatorio."
    ))]
    pub documento_identidad: String,
    pub telefono: String,
    pub motivo_visita: VisitReason,
    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(required(message = "Debe seleccionar un anfitrión."))]
    pub anfitrion_id: Option<i64>,
    pub placa_vehiculo: String,
    /// Blank means "now"
    pub fecha_entrada: String,
}

/// Fields in the order errors are reported
const FIELD_ORDER: [&str; 3] = ["nombre", "documento_identidad", "anfitrion_id"];

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl VisitorForm {
    /// Empty form with the entry time set to `now`
    pub fn blank(now: DateTime<Local>) -> Self {
        Self {
            fecha_entrada: now.format(LOCAL_INPUT_FORMAT).to_string(),
            ..Default::default()
        }
    }

    /// Pre-fill from an existing record, showing the entry time in local time
    pub fn from_visitor(visitor: &Visitor) -> Self {
        Self {
            nombre: visitor.nombre.clone(),
            documento_identidad: visitor.documento_identidad.clone(),
            telefono: visitor.telefono.clone().unwrap_or_default(),
            motivo_visita: visitor.motivo_visita,
            anfitrion_id: visitor.host_id(),
            placa_vehiculo: visitor.placa_vehiculo.clone().unwrap_or_default(),
            fecha_entrada: visitor
                .fecha_entrada
                .with_timezone(&Local)
                .format(LOCAL_INPUT_FORMAT)
                .to_string(),
        }
    }

    /// Check required fields and build the request body. The first failing field, in form
    /// order, is reported.
    pub fn to_payload(&self) -> Result<VisitorPayload, String> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            let message = FIELD_ORDER
                .iter()
                .filter_map(|field| field_errors.get(*field))
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Formulario incompleto.".to_string());
            return Err(message);
        }

        let fecha_entrada = if self.fecha_entrada.trim().is_empty() {
            Local::now().fixed_offset()
        } else {
            parse_local_input(&self.fecha_entrada)
                .ok_or_else(|| "La fecha de entrada no es válida.".to_string())?
        };

        Ok(VisitorPayload {
            nombre: self.nombre.trim().to_string(),
            documento_identidad: self.documento_identidad.trim().to_string(),
            telefono: optional(&self.telefono),
            motivo_visita: self.motivo_visita,
            anfitrion_id: self.anfitrion_id.ok_or_else(|| "Debe seleccionar un anfitrión.".to_string())?,
            placa_vehiculo: optional(&self.placa_vehiculo).map(|p| p.to_uppercase()),
            fecha_entrada,
        })
    }
}

/// Interpret a `datetime-local` value in the server's local zone
pub fn parse_local_input(value: &str) -> Option<DateTime<chrono::FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), LOCAL_INPUT_FORMAT).ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Everything the form page needs to render
#[derive(Debug, Clone)]
pub struct VisitorFormView {
    pub mode: FormMode,
    pub form: VisitorForm,
    pub residents: Vec<Resident>,
    /// Shown next to the host picker when residents could not be loaded
    pub residents_warning: Option<String>,
    /// Inline error from validation or from the backend
    pub error: Option<String>,
}

/// Result of a submit attempt
#[derive(Debug)]
pub enum SubmitOutcome {
    Saved(Visitor),
    /// Validation or backend failure; `VisitorFormView::error` holds the message
    Rejected,
}

impl VisitorFormView {
    pub fn new(mode: FormMode, form: VisitorForm, residents: ReferenceData<Vec<Resident>>) -> Self {
        let (residents, residents_warning) = residents.into_parts();
        Self {
            mode,
            form,
            residents,
            residents_warning,
            error: None,
        }
    }

    /// Validate locally, then create or update. No request is sent when validation fails.
    pub async fn submit(&mut self, visitors: &VisitorsService) -> SubmitOutcome {
        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(message) => {
                tracing::debug!("Visitor form rejected: {}", message);
                self.error = Some(message);
                return SubmitOutcome::Rejected;
            }
        };

        let result = match self.mode {
            FormMode::Create => visitors.create(&payload).await,
            FormMode::Edit(id) => visitors.update(id, &payload).await,
        };

        match result {
            Ok(visitor) => {
                self.error = None;
                SubmitOutcome::Saved(visitor)
            }
            Err(e) => {
                tracing::warn!("Saving visitor failed: {}", e);
                self.error = Some(e.user_message());
                SubmitOutcome::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{client::MockTransport, error::AppError};
    use serde_json::json;
    use std::sync::Arc;

    fn filled() -> VisitorForm {
        VisitorForm {
            nombre: " Juan Pérez ".to_string(),
            documento_identidad: "1020304050".to_string(),
            telefono: String::new(),
            motivo_visita: VisitReason::Reunion,
            anfitrion_id: Some(3),
            placa_vehiculo: "abc123".to_string(),
            fecha_entrada: "2024-01-01T08:30".to_string(),
        }
    }

    fn untouched_service() -> VisitorsService {
        let mut transport = MockTransport::new();
        transport.expect_post().times(0);
        transport.expect_put().times(0);
        VisitorsService::new(Arc::new(transport))
    }

    #[test]
    fn payload_trims_and_drops_empty_optionals() {
        let payload = filled().to_payload().unwrap();
        assert_eq!(payload.nombre, "Juan Pérez");
        assert_eq!(payload.telefono, None);
        assert_eq!(payload.placa_vehiculo.as_deref(), Some("ABC123"));
        assert_eq!(payload.anfitrion_id, 3);
    }

    #[test]
    fn first_missing_field_is_reported() {
        let mut form = filled();
        form.nombre = "   ".to_string();
        form.documento_identidad = String::new();
        assert_eq!(form.to_payload().unwrap_err(), "El nombre es obligatorio.");

        let mut form = filled();
        form.documento_identidad = " ".to_string();
        assert_eq!(
            form.to_payload().unwrap_err(),
            "El documento de identidad es obligatorio."
        );

        let mut form = filled();
        form.anfitrion_id = None;
        assert_eq!(form.to_payload().unwrap_err(), "Debe seleccionar un anfitrión.");
    }

    #[test]
    fn blank_entry_time_defaults_to_now() {
        let before = Local::now().fixed_offset();
        let payload = VisitorForm { fecha_entrada: "  ".to_string(), ..filled() }
            .to_payload()
            .unwrap();
        let after = Local::now().fixed_offset();

        assert!(payload.fecha_entrada >= before && payload.fecha_entrada <= after);
    }

    #[test]
    fn garbled_entry_time_is_rejected() {
        let form = VisitorForm { fecha_entrada: "ayer".to_string(), ..filled() };
        assert_eq!(form.to_payload().unwrap_err(), "La fecha de entrada no es válida.");
    }

    #[test]
    fn empty_host_select_deserializes_to_none() {
        let form: VisitorForm = serde_json::from_value(json!({
            "nombre": "Ana",
            "anfitrion_id": "",
            "motivo_visita": "otro"
        }))
        .unwrap();
        assert_eq!(form.anfitrion_id, None);
        assert_eq!(form.motivo_visita, VisitReason::Otro);
    }

    #[test]
    fn blank_form_defaults_entry_to_now() {
        let now = Local.with_ymd_and_hms(2024, 5, 6, 14, 7, 0).unwrap();
        assert_eq!(VisitorForm::blank(now).fecha_entrada, "2024-05-06T14:07");
    }

    #[test]
    fn edit_prefill_converts_entry_to_local_time() {
        let visitor: Visitor = serde_json::from_value(json!({
            "id": 4,
            "nombre": "Marta",
            "documento_identidad": "55",
            "telefono": "3001234567",
            "motivo_visita": "evento",
            "anfitrion": 9,
            "fecha_entrada": "2024-03-10T15:45:00Z"
        }))
        .unwrap();

        let form = VisitorForm::from_visitor(&visitor);
        let expected = visitor
            .fecha_entrada
            .with_timezone(&Local)
            .format(LOCAL_INPUT_FORMAT)
            .to_string();

        assert_eq!(form.fecha_entrada, expected);
        assert_eq!(form.anfitrion_id, Some(9));
        assert_eq!(form.telefono, "3001234567");
        assert_eq!(
            parse_local_input(&form.fecha_entrada).unwrap(),
            visitor.fecha_entrada
        );
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let service = untouched_service();
        for form in [
            VisitorForm { nombre: String::new(), ..filled() },
            VisitorForm { documento_identidad: String::new(), ..filled() },
            VisitorForm { anfitrion_id: None, ..filled() },
        ] {
            let mut view = VisitorFormView::new(FormMode::Create, form, ReferenceData::Loaded(vec![]));
            assert!(matches!(view.submit(&service).await, SubmitOutcome::Rejected));
            assert!(view.error.is_some());
        }
    }

    #[tokio::test]
    async fn edit_submits_update_for_same_id() {
        let mut transport = MockTransport::new();
        transport
            .expect_put()
            .withf(|path, body| path == "visitantes/4/" && body["nombre"] == "Juan Pérez")
            .times(1)
            .returning(|_, _| {
                Ok(json!({
                    "id": 4,
                    "nombre": "Juan Pérez",
                    "documento_identidad": "1020304050",
                    "motivo_visita": "reunion",
                    "anfitrion": 3,
                    "fecha_entrada": "2024-01-01T13:30:00Z"
                }))
            });
        let service = VisitorsService::new(Arc::new(transport));

        let mut view = VisitorFormView::new(FormMode::Edit(4), filled(), ReferenceData::Loaded(vec![]));
        match view.submit(&service).await {
            SubmitOutcome::Saved(visitor) => assert_eq!(visitor.id, 4),
            SubmitOutcome::Rejected => panic!("expected save, got {:?}", view.error),
        }
    }

    #[tokio::test]
    async fn backend_rejection_is_shown_inline() {
        let mut transport = MockTransport::new();
        transport.expect_post().times(1).returning(|_, _| {
            Err(AppError::from_api_response(
                400,
                r#"{"message": "El anfitrión no pertenece al condominio"}"#,
            ))
        });
        let service = VisitorsService::new(Arc::new(transport));

        let mut view = VisitorFormView::new(FormMode::Create, filled(), ReferenceData::Loaded(vec![]));
        assert!(matches!(view.submit(&service).await, SubmitOutcome::Rejected));
        assert_eq!(
            view.error.as_deref(),
            Some("El anfitrión no pertenece al condominio")
        );
    }
}
