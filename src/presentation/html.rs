use super::*;
use crate::core::controller::{Banner, FormState, FormView};
use crate::core::validation::{MAX_AGE, MAX_REASON_CHARS, MIN_AGE};
use crate::domain::model::{EmploymentStatus, Field};

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// 整頁 HTML：課程資訊面板 + 表單面板
pub fn render_page(view: &FormView, year: i32) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(ACADEMY_NAME)));
    html.push_str("</head>\n<body>\n<header class=\"academic-header\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(ACADEMY_NAME)));
    html.push_str(&format!("<p class=\"subtitulo\">{}</p>\n", escape(PROGRAM_SUBTITLE)));
    html.push_str("</header>\n<main>\n");
    html.push_str(&render_info_panel());
    html.push_str(&render_form_panel(view));
    html.push_str("</main>\n");
    html.push_str(&format!(
        "<footer class=\"copyright\"><p>{}</p></footer>\n",
        escape(&copyright(year))
    ));
    html.push_str("</body>\n</html>\n");
    html
}

pub fn render_info_panel() -> String {
    let mut html = String::from("<section class=\"info-panel\">\n");
    html.push_str(&format!("<h2>{}</h2>\n<ul class=\"info-list\">\n", escape(INFO_TITLE)));
    for item in INFO_ITEMS {
        html.push_str(&format!(
            "<li><strong>{}:</strong> {}</li>\n",
            escape(item.title),
            escape(item.text)
        ));
    }
    html.push_str("</ul>\n");
    html.push_str(&format!(
        "<div class=\"important-note\"><h3>Importante</h3><p>{}</p></div>\n",
        escape(IMPORTANT_NOTE)
    ));
    html.push_str("</section>\n");
    html
}

pub fn render_form_panel(view: &FormView) -> String {
    let mut html = String::from("<section class=\"form-panel\">\n");

    match view.banner {
        Some(Banner::Success) => html.push_str(&format!(
            "<div class=\"alert success\" role=\"status\">{}</div>\n",
            escape(Banner::Success.message())
        )),
        Some(Banner::Failure) => html.push_str(&format!(
            "<div class=\"alert error\" role=\"alert\">{}</div>\n",
            escape(Banner::Failure.message())
        )),
        None => {}
    }

    html.push_str(&format!("<h2>{}</h2>\n", escape(FORM_TITLE)));
    html.push_str(&format!("<p class=\"instrucciones\">{}</p>\n", escape(FORM_INSTRUCTIONS)));
    html.push_str("<form id=\"inscripcion\" novalidate>\n");

    for field in Field::ALL {
        html.push_str(&render_field(view, field));
    }

    let (disabled, label) = if view.state == FormState::Submitting {
        (" disabled", SUBMITTING_LABEL)
    } else if view.submit_enabled() {
        ("", SUBMIT_LABEL)
    } else {
        (" disabled", SUBMIT_LABEL)
    };
    html.push_str(&format!(
        "<button type=\"submit\"{}>{}</button>\n</form>\n",
        disabled,
        escape(label)
    ));

    html.push_str(&format!(
        "<div class=\"footer-info\"><p>{}</p>\n<a href=\"mailto:{}\">{}</a>\n<span>Tel: {}</span></div>\n",
        escape(PRIVACY_NOTE),
        CONTACT_EMAIL,
        CONTACT_EMAIL,
        escape(CONTACT_PHONE)
    ));
    html.push_str("</section>\n");
    html
}

fn render_field(view: &FormView, field: Field) -> String {
    let key = field.key();
    let value = view.values.get(field);
    let error = view.errors.get(field);
    let invalid = if error.is_some() { " aria-invalid=\"true\"" } else { "" };

    let mut html = String::from("<div class=\"form-field\">\n");
    html.push_str(&format!(
        "<label for=\"{}\">{} *</label>\n",
        key,
        escape(field.label())
    ));

    match field {
        Field::EmploymentStatus => {
            html.push_str(&format!("<select id=\"{0}\" name=\"{0}\"{1}>\n", key, invalid));
            html.push_str("<option value=\"\"></option>\n");
            for status in EmploymentStatus::ALL {
                let selected = if status.label() == value { " selected" } else { "" };
                html.push_str(&format!(
                    "<option value=\"{0}\"{1}>{0}</option>\n",
                    escape(status.label()),
                    selected
                ));
            }
            html.push_str("</select>\n");
        }
        Field::Reason => {
            html.push_str(&format!(
                "<textarea id=\"{0}\" name=\"{0}\" rows=\"4\" maxlength=\"{1}\" placeholder=\"{2}\"{3}>{4}</textarea>\n",
                key,
                MAX_REASON_CHARS,
                escape(REASON_PLACEHOLDER),
                invalid,
                escape(value)
            ));
        }
        Field::Age => {
            html.push_str(&format!(
                "<input id=\"{0}\" name=\"{0}\" type=\"number\" min=\"{1}\" max=\"{2}\" value=\"{3}\"{4}>\n",
                key,
                MIN_AGE,
                MAX_AGE,
                escape(value),
                invalid
            ));
        }
        Field::Email => {
            html.push_str(&format!(
                "<input id=\"{0}\" name=\"{0}\" type=\"email\" value=\"{1}\"{2}>\n",
                key,
                escape(value),
                invalid
            ));
        }
        Field::FirstName | Field::LastName => {
            html.push_str(&format!(
                "<input id=\"{0}\" name=\"{0}\" type=\"text\" value=\"{1}\"{2}>\n",
                key,
                escape(value),
                invalid
            ));
        }
    }

    match (error, field) {
        (Some(message), _) => html.push_str(&format!(
            "<p class=\"field-error\">{}</p>\n",
            escape(message)
        )),
        (None, Field::Reason) => html.push_str(&format!(
            "<p class=\"helper-text\">{}</p>\n",
            escape(REASON_HINT)
        )),
        (None, _) => {}
    }

    html.push_str("</div>\n");
    html
}
