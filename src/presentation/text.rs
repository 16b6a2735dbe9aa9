use super::*;
use crate::core::controller::FormView;
use crate::domain::model::{EmploymentStatus, FieldErrors};

pub fn render_info() -> String {
    let mut out = format!("{}\n{}\n\n{}\n", ACADEMY_NAME, PROGRAM_SUBTITLE, INFO_TITLE);
    for item in INFO_ITEMS {
        out.push_str(&format!("  • {}: {}\n", item.title, item.text));
    }
    out.push_str(&format!("\nImportante: {}\n\n", IMPORTANT_NOTE));
    out.push_str("Estatus laboral (opciones):\n");
    out.push_str(&render_status_options());
    out.push_str(&format!(
        "\nContacto: {} | Tel: {}\n",
        CONTACT_EMAIL, CONTACT_PHONE
    ));
    out
}

pub fn render_status_options() -> String {
    EmploymentStatus::ALL
        .iter()
        .enumerate()
        .map(|(i, status)| format!("  {}. {}\n", i + 1, status.label()))
        .collect()
}

pub fn render_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  ✗ {}: {}\n", field.label(), message))
        .collect()
}

/// 終端機版本的表單狀態
pub fn render_view(view: &FormView) -> String {
    let mut out = String::new();
    if let Some(banner) = view.banner {
        out.push_str(banner.message());
        out.push('\n');
    }
    if !view.errors.is_empty() {
        out.push_str(&render_errors(&view.errors));
    }
    out
}
