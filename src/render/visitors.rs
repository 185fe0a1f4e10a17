//! Visitor list and visitor form pages

use axum::response::Html;
use chrono::{DateTime, Local, Utc};

use crate::{
    models::{
        enums::{VisitReason, VisitorStatus},
        visitor::{Visitor, FILTER_REASON, FILTER_STATUS},
    },
    views::{
        shell::NavigationShell,
        visitor_form::{FormMode, VisitorFormView},
        visitor_list::{ListPhase, Modal, RowAction, RowView, VisitorListView},
    },
};

use super::{escape, href, layout};

const LIST_PATH: &str = "/visitantes";

fn local_time(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
}

fn option_tag(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    )
}

/// List query pairs plus a modal to open
fn modal_href(view: &VisitorListView, modal: Modal) -> String {
    let mut pairs = view.query().to_pairs();
    pairs.push(("modal".to_string(), modal.query_name().to_string()));
    pairs.push(("id".to_string(), modal.visitor_id().to_string()));
    href(LIST_PATH, &pairs)
}

fn list_href(view: &VisitorListView) -> String {
    href(LIST_PATH, &view.query().to_pairs())
}

fn filter_bar(view: &VisitorListView) -> String {
    let query = view.query();
    let reason = query.filter(FILTER_REASON).unwrap_or("");
    let status = query.filter(FILTER_STATUS).unwrap_or("");

    let mut reasons = option_tag("", "Todos los motivos", reason.is_empty());
    for r in VisitReason::ALL {
        reasons.push_str(&option_tag(r.as_str(), &r.to_string(), r.as_str() == reason));
    }

    let mut statuses = option_tag("", "Todos los estados", status.is_empty());
    for s in VisitorStatus::ALL {
        statuses.push_str(&option_tag(s.as_str(), &s.to_string(), s.as_str() == status));
    }

    format!(
        r#"<form method="get" action="{list}" class="filters">
<input type="search" name="search" value="{search}" placeholder="Buscar por nombre, documento o placa">
<select name="{reason_key}">{reasons}</select>
<select name="{status_key}">{statuses}</select>
<button type="submit">Buscar</button>
</form>"#,
        list = LIST_PATH,
        search = escape(&query.search),
        reason_key = FILTER_REASON,
        status_key = FILTER_STATUS,
        reasons = reasons,
        statuses = statuses,
    )
}

fn export_links(view: &VisitorListView) -> String {
    let pairs = view.query().to_pairs();
    format!(
        r#"<p class="exports"><a href="{}">Exportar CSV</a> <a href="{}">Exportar PDF</a> <a href="/visitantes/nuevo">Nuevo visitante</a></p>"#,
        escape(&href("/visitantes/exportar.csv", &pairs)),
        escape(&href("/visitantes/exportar.pdf", &pairs)),
    )
}

fn row_action(view: &VisitorListView, visitor: &Visitor, action: RowAction) -> String {
    let (url, label, name) = match action {
        RowAction::Detail => (modal_href(view, Modal::Detail(visitor.id)), "Ver", "detail"),
        RowAction::CheckOut => (
            modal_href(view, Modal::ConfirmCheckOut(visitor.id)),
            "Registrar salida",
            "checkout",
        ),
        RowAction::Edit => (format!("/visitantes/{}/editar", visitor.id), "Editar", "edit"),
        RowAction::Delete => (
            modal_href(view, Modal::ConfirmDelete(visitor.id)),
            "Eliminar",
            "delete",
        ),
    };
    format!(
        r#"<a href="{}" data-action="{}">{}</a>"#,
        escape(&url),
        name,
        label
    )
}

fn table_row(view: &VisitorListView, row: &RowView<'_>) -> String {
    let v = row.visitor;
    let actions: Vec<String> = row
        .actions
        .iter()
        .map(|action| row_action(view, v, *action))
        .collect();

    format!(
        r#"<tr data-visitor="{id}"{class}><td>{nombre}</td><td>{doc}</td><td>{motivo}</td><td>{host}</td><td>{placa}</td><td>{entrada}</td><td>{salida}</td><td>{actions}</td></tr>"#,
        id = v.id,
        class = if row.highlighted { r#" class="on-premises""# } else { "" },
        nombre = escape(&v.nombre),
        doc = escape(&v.documento_identidad),
        motivo = escape(&v.motivo_visita.to_string()),
        host = escape(&v.host_label()),
        placa = escape(v.placa_vehiculo.as_deref().unwrap_or("-")),
        entrada = local_time(v.fecha_entrada),
        salida = v
            .fecha_salida
            .map(local_time)
            .unwrap_or_else(|| VisitorStatus::Dentro.to_string()),
        actions = actions.join(" "),
    )
}

fn pagination(view: &VisitorListView) -> String {
    let current = view.query().page;
    let pages = view.total_pages().max(1);

    let link = |page: u64, label: &str| {
        let mut query = view.query().clone();
        query.page = page;
        format!(
            r#"<a href="{}">{}</a>"#,
            escape(&href(LIST_PATH, &query.to_pairs())),
            label
        )
    };

    let mut html = String::from(r#"<nav class="pagination">"#);
    if current > 1 {
        html.push_str(&link(current - 1, "&laquo; Anterior"));
    }
    for page in 1..=pages {
        if page == current {
            html.push_str(&format!(r#"<span class="current">{}</span>"#, page));
        } else {
            html.push_str(&link(page, &page.to_string()));
        }
    }
    if current < pages {
        html.push_str(&link(current + 1, "Siguiente &raquo;"));
    }
    html.push_str(&format!(
        r#"<span class="total">{} registros</span></nav>"#,
        view.total_count()
    ));
    html
}

fn detail_list(v: &Visitor) -> String {
    let mut fields = vec![
        ("Nombre", v.nombre.clone()),
        ("Documento", v.documento_identidad.clone()),
        ("Teléfono", v.telefono.clone().unwrap_or_else(|| "-".to_string())),
        ("Motivo", v.motivo_visita.to_string()),
        ("Anfitrión", v.host_label()),
        ("Placa", v.placa_vehiculo.clone().unwrap_or_else(|| "-".to_string())),
        ("Entrada", local_time(v.fecha_entrada)),
        (
            "Salida",
            v.fecha_salida
                .map(local_time)
                .unwrap_or_else(|| VisitorStatus::Dentro.to_string()),
        ),
    ];
    if let Some(stay) = v.time_on_premises() {
        fields.push((
            "Permanencia",
            format!("{} h {} min", stay.num_hours(), stay.num_minutes() % 60),
        ));
    }

    let items: String = fields
        .into_iter()
        .map(|(k, val)| format!("<dt>{}</dt><dd>{}</dd>", k, escape(&val)))
        .collect();
    format!("<dl>{}</dl>", items)
}

fn modal(view: &VisitorListView) -> String {
    let Some((modal, v)) = view.modal_visitor() else {
        return String::new();
    };
    let close = escape(&list_href(view));
    let query = escape(&super::query_string(&view.query().to_pairs()));

    let (title, content) = match modal {
        Modal::Detail(_) => (
            "Detalle del visitante",
            format!(r#"{}<p><a href="{}">Cerrar</a></p>"#, detail_list(v), close),
        ),
        Modal::ConfirmCheckOut(id) => (
            "Registrar salida",
            format!(
                r#"<p>¿Registrar la salida de <strong>{}</strong>?</p>
<form method="post" action="/visitantes/{}/salida?{}" class="inline"><button type="submit">Confirmar salida</button></form>
<a href="{}">Cancelar</a>"#,
                escape(&v.nombre),
                id,
                query,
                close
            ),
        ),
        Modal::ConfirmDelete(id) => (
            "Eliminar visitante",
            format!(
                r#"<p>¿Eliminar el registro de <strong>{}</strong>? Esta acción no se puede deshacer.</p>
<form method="post" action="/visitantes/{}/eliminar?{}" class="inline"><button type="submit">Eliminar</button></form>
<a href="{}">Cancelar</a>"#,
                escape(&v.nombre),
                id,
                query,
                close
            ),
        ),
    };

    format!(
        r#"<div class="modal-backdrop"><div class="modal" role="dialog" data-modal="{}"><h2>{}</h2>{}</div></div>"#,
        modal.query_name(),
        title,
        content
    )
}

/// Visitor list page. `notice` carries an inline error from a failed mutation.
pub fn list_page(shell: &NavigationShell, view: &VisitorListView, notice: Option<&str>) -> Html<String> {
    let rows: String = view.rows().iter().map(|row| table_row(view, row)).collect();
    let table = if view.phase() == ListPhase::Loading {
        r#"<p class="loading">Cargando visitantes...</p>"#.to_string()
    } else if rows.is_empty() {
        r#"<p class="empty">No hay visitantes registrados con estos criterios.</p>"#.to_string()
    } else {
        format!(
            "<table><thead><tr><th>Nombre</th><th>Documento</th><th>Motivo</th><th>Anfitrión</th><th>Placa</th><th>Entrada</th><th>Salida</th><th>Acciones</th></tr></thead><tbody>{}</tbody></table>",
            rows
        )
    };

    let body = format!(
        "{notice}{filters}{exports}{table}{pagination}{modal}",
        notice = layout::alert("error", notice),
        filters = filter_bar(view),
        exports = export_links(view),
        table = table,
        pagination = pagination(view),
        modal = modal(view),
    );
    layout::page(shell, "Registro de visitantes", &body)
}

/// Create or edit form page
pub fn form_page(shell: &NavigationShell, view: &VisitorFormView) -> Html<String> {
    let (title, action) = match view.mode {
        FormMode::Create => ("Nuevo visitante".to_string(), "/visitantes/nuevo".to_string()),
        FormMode::Edit(id) => ("Editar visitante".to_string(), format!("/visitantes/{}/editar", id)),
    };
    let form = &view.form;

    let reasons: String = VisitReason::ALL
        .into_iter()
        .map(|r| option_tag(r.as_str(), &r.to_string(), r == form.motivo_visita))
        .collect();

    let mut hosts = option_tag("", "Seleccione un anfitrión", form.anfitrion_id.is_none());
    for resident in &view.residents {
        hosts.push_str(&option_tag(
            &resident.id.to_string(),
            &resident.display_label(),
            form.anfitrion_id == Some(resident.id),
        ));
    }

    let body = format!(
        r#"{error}<form method="post" action="{action}" class="visitor-form">
<label for="nombre">Nombre *</label>
<input id="nombre" name="nombre" value="{nombre}">
<label for="documento_identidad">Documento de identidad *</label>
<input id="documento_identidad" name="documento_identidad" value="{documento}">
<label for="telefono">Teléfono</label>
<input id="telefono" name="telefono" value="{telefono}">
<label for="motivo_visita">Motivo de la visita</label>
<select id="motivo_visita" name="motivo_visita">{reasons}</select>
<label for="anfitrion_id">Anfitrión *</label>
<select id="anfitrion_id" name="anfitrion_id">{hosts}</select>
{residents_warning}
<label for="placa_vehiculo">Placa del vehículo</label>
<input id="placa_vehiculo" name="placa_vehiculo" value="{placa}">
<label for="fecha_entrada">Fecha de entrada</label>
<input id="fecha_entrada" name="fecha_entrada" type="datetime-local" value="{fecha}">
<p><button type="submit">Guardar</button> <a href="{list}">Cancelar</a></p>
</form>"#,
        error = layout::alert("error", view.error.as_deref()),
        action = action,
        nombre = escape(&form.nombre),
        documento = escape(&form.documento_identidad),
        telefono = escape(&form.telefono),
        reasons = reasons,
        hosts = hosts,
        residents_warning = layout::alert("warning", view.residents_warning.as_deref()),
        placa = escape(&form.placa_vehiculo),
        fecha = escape(&form.fecha_entrada),
        list = LIST_PATH,
    );
    layout::page(shell, &title, &body)
}
