//! Page chrome: document head, top bar and side menu

use axum::{http::StatusCode, response::Html};

use crate::views::shell::{MenuSection, NavigationShell, Presentation, MOBILE_BREAKPOINT_PX};

use super::escape;

const APP_TITLE: &str = "Administración del Condominio";

fn stylesheet() -> String {
    format!(
        r#"
body {{ margin: 0; font-family: system-ui, sans-serif; background: #f4f6f9; color: #222; }}
.topbar {{ position: fixed; top: 0; left: 0; right: 0; height: 56px; background: #1f3a5f; color: #fff;
  display: flex; align-items: center; padding: 0 16px; z-index: 20; }}
.topbar .brand {{ font-weight: 600; margin-left: 8px; }}
.shell-desktop {{ position: fixed; top: 56px; bottom: 0; left: 0; width: 240px; background: #fff;
  border-right: 1px solid #dde2e8; overflow-y: auto; }}
.shell-mobile {{ display: none; }}
.menu-toggle, .menu-toggle-label {{ display: none; }}
main {{ margin: 56px 0 0 240px; padding: 24px; }}
.menu details {{ border-bottom: 1px solid #eef1f4; }}
.menu summary {{ padding: 12px 16px; cursor: pointer; font-weight: 600; }}
.menu a {{ display: block; padding: 8px 28px; color: #1f3a5f; text-decoration: none; }}
.menu a.active {{ background: #e6eef8; font-weight: 600; }}
table {{ width: 100%; border-collapse: collapse; background: #fff; }}
th, td {{ padding: 8px; border-bottom: 1px solid #e3e7ec; text-align: left; font-size: 14px; }}
tr.on-premises {{ background: #fff7d6; }}
.alert {{ padding: 12px 16px; border-radius: 4px; margin-bottom: 16px; }}
.alert-error {{ background: #fde2e1; color: #8a1c17; }}
.alert-warning {{ background: #fff3cd; color: #7a5a00; }}
.cards {{ display: flex; flex-wrap: wrap; gap: 16px; margin-bottom: 24px; }}
.card {{ background: #fff; padding: 16px; border-radius: 6px; min-width: 180px; box-shadow: 0 1px 2px #0001; }}
.card .value {{ font-size: 22px; font-weight: 600; }}
.chart {{ background: #fff; padding: 16px; border-radius: 6px; margin-bottom: 24px; }}
.bar-row {{ display: flex; align-items: center; margin: 6px 0; font-size: 13px; }}
.bar-label {{ width: 160px; }}
.bar-track {{ flex: 1; background: #eef1f4; height: 14px; margin: 0 8px; }}
.bar {{ background: #3b6ea5; height: 14px; }}
.modal-backdrop {{ position: fixed; inset: 0; background: #0006; display: flex; align-items: center;
  justify-content: center; z-index: 30; }}
.modal {{ background: #fff; padding: 24px; border-radius: 6px; min-width: 320px; max-width: 560px; }}
.pagination a, .pagination span {{ margin-right: 6px; }}
form.inline {{ display: inline; }}
label {{ display: block; margin-top: 12px; font-weight: 600; }}
input, select {{ padding: 6px; min-width: 260px; }}
@media (max-width: {max_mobile}px) {{
  .shell-desktop {{ display: none; }}
  .menu-toggle-label {{ display: inline-block; cursor: pointer; font-size: 22px; }}
  .shell-mobile {{ display: block; position: fixed; top: 56px; bottom: 0; left: -280px; width: 260px;
    background: #fff; transition: left .2s; z-index: 25; overflow-y: auto; }}
  .menu-toggle:checked ~ .shell-mobile {{ left: 0; }}
  main {{ margin-left: 0; }}
}}
"#,
        max_mobile = MOBILE_BREAKPOINT_PX - 1
    )
}

fn render_menu(shell: &NavigationShell, presentation: Presentation) -> String {
    let mut html = format!(r#"<nav class="menu {}">"#, presentation.css_class());

    for section in MenuSection::ALL {
        let open = if shell.is_open(section) { " open" } else { "" };
        html.push_str(&format!(
            "<details{}><summary>{}</summary>",
            open,
            escape(section.label())
        ));
        for link in section.links() {
            let class = if shell.is_active(link) { r#" class="active""# } else { "" };
            html.push_str(&format!(
                r#"<a href="{}"{}>{}</a>"#,
                link.href,
                class,
                escape(link.label)
            ));
        }
        html.push_str("</details>");
    }

    html.push_str("</nav>");
    html
}

/// Full HTML document for a page
pub fn page(shell: &NavigationShell, title: &str, body: &str) -> Html<String> {
    let presentations = shell.presentations();
    let has_mobile = presentations.contains(&Presentation::Mobile);

    let mut chrome = String::new();
    if has_mobile {
        chrome.push_str(r#"<input type="checkbox" id="menu-toggle" class="menu-toggle">"#);
    }
    chrome.push_str(r#"<header class="topbar">"#);
    if has_mobile {
        chrome.push_str(r#"<label for="menu-toggle" class="menu-toggle-label">&#9776;</label>"#);
    }
    chrome.push_str(&format!(r#"<span class="brand">{}</span></header>"#, APP_TITLE));
    for presentation in presentations {
        chrome.push_str(&render_menu(shell, presentation));
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {app}</title>
<style>{css}</style>
</head>
<body>
{chrome}
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        app = APP_TITLE,
        css = stylesheet(),
        chrome = chrome,
        body = body,
    ))
}

/// Blocking error page for failures that make a page unusable
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let shell = NavigationShell::for_page("/");
    let body = format!(
        r#"<div class="alert alert-error" role="alert"><strong>Error {}</strong><p>{}</p></div>
<p><a href="/visitantes">Volver al registro de visitantes</a></p>"#,
        status.as_u16(),
        escape(message)
    );
    page(&shell, "No se pudo completar la operación", &body)
}

/// Inline alert box, or nothing
pub fn alert(kind: &str, message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            r#"<div class="alert alert-{}" role="alert">{}</div>"#,
            kind,
            escape(message)
        ),
        None => String::new(),
    }
}
