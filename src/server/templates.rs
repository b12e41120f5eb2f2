use anyhow::{anyhow, Result};
use axum::{http::StatusCode, response::Html};
use handlebars::{handlebars_helper, Handlebars};
use include_dir::{include_dir, Dir};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

static TEMPLATE_DIR: Dir = include_dir!("templates");

/// Handlebars registry with the page templates and formatting helpers
///
/// Every `*.hbs` file is registered under its file stem, so `header` and
/// `footer` are usable as partials.
pub fn get_handlebars() -> Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(exists: |v: Value| !v.is_null());
    handlebars.register_helper("exists", Box::new(exists));

    handlebars_helper!(fixed: |v: f64, digits: u64| format!("{:.*}", digits as usize, v));
    handlebars.register_helper("fixed", Box::new(fixed));

    for file in TEMPLATE_DIR.files() {
        let path = file.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("hbs") {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| anyhow!("Invalid template file name {}", path.display()))?;
        let source = file
            .contents_utf8()
            .ok_or_else(|| anyhow!("Template {} is not UTF-8", name))?;
        handlebars.register_template_string(name, source)?;
    }

    Ok(handlebars)
}

pub fn render_page<T: Serialize>(
    templates: &Handlebars<'_>,
    name: &str,
    data: &T,
) -> Result<Html<String>, StatusCode> {
    templates.render(name, data).map(Html).map_err(|e| {
        error!("Failed to render template {}: {}", name, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
