use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;
use tracing::debug;

use crate::connector::api::Container;
use crate::domain::{DomainError, GenerationRequest, ListingInput};

/// Raw form fields as posted by the browser.
///
/// Everything arrives as text; the surface field is parsed during validation
/// so a blank input falls back to 0 (the "not provided" value).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingForm {
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub surface_area: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub weaknesses: String,
}

impl ListingForm {
    fn parse(&self) -> Result<ListingInput, DomainError> {
        let surface = self.surface_area.trim();
        let surface_area = if surface.is_empty() {
            0
        } else {
            surface.parse::<u32>().map_err(|_| {
                DomainError::invalid_input("surface area must be a non-negative whole number")
            })?
        };

        Ok(ListingInput {
            property_type: self.property_type.trim().to_string(),
            city: self.city.trim().to_string(),
            surface_area,
            price: self.price.trim().to_string(),
            strengths: self.strengths.trim().to_string(),
            weaknesses: self.weaknesses.trim().to_string(),
        })
    }
}

enum NoticeKind {
    Success,
    Warning,
    Error,
}

struct Notice {
    kind: NoticeKind,
    text: String,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    fn class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice success",
            NoticeKind::Warning => "notice warning",
            NoticeKind::Error => "notice error",
        }
    }
}

/// `GET /` — the empty form, waiting for a submission.
pub async fn show_form(State(_container): State<Arc<Container>>) -> Html<String> {
    Html(render_page(&ListingForm::default(), &[], None))
}

/// `POST /generate` — one complete submission cycle.
///
/// Validation happens before any outbound call; a generation failure aborts
/// without logging; a logging failure downgrades to a warning next to the
/// generated text. The form always comes back filled in, ready for the next
/// submission.
pub async fn submit_listing(
    State(container): State<Arc<Container>>,
    Form(form): Form<ListingForm>,
) -> Html<String> {
    let request = match form.parse().and_then(GenerationRequest::new) {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejected submission: {e}");
            let notice = Notice::warning(format!(
                "Merci de remplir le Type, la Ville et les Points Forts. ({e})"
            ));
            return Html(render_page(&form, &[notice], None));
        }
    };

    match container.generate_use_case().execute(request).await {
        Ok(outcome) => {
            let mut notices = vec![Notice::success("Annonce générée !")];
            if let Some(err) = outcome.log_error() {
                notices.push(Notice::warning(format!(
                    "Sauvegarde Google Sheets impossible : {err}"
                )));
            } else {
                notices.push(Notice::success("Sauvegardé ✅"));
            }
            Html(render_page(
                &form,
                &notices,
                Some(outcome.listing().generated_text()),
            ))
        }
        Err(e) => {
            let notice = if e.is_missing_secret() {
                Notice::error(format!("⚠️ Configuration incomplète : {e}"))
            } else {
                Notice::error(format!("Erreur : {e}"))
            };
            Html(render_page(&form, &[notice], None))
        }
    }
}

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; background: #f8fafc; margin: 0; }
main { max-width: 640px; margin: 2rem auto; padding: 0 1rem; }
h1 { color: #1e1b4b; }
.tagline { color: #475569; }
label { display: block; margin-top: 1rem; font-weight: 600; color: #1e1b4b; }
input, textarea { width: 100%; box-sizing: border-box; margin-top: 0.25rem;
  padding: 0.5rem; border: 1px solid #cbd5e1; border-radius: 6px; }
button { width: 100%; margin-top: 1.5rem; background-color: #4F46E5; color: white;
  font-weight: bold; border: none; border-radius: 8px; padding: 0.75rem; cursor: pointer; }
button:hover { background-color: #4338ca; }
.notice { margin-top: 1rem; padding: 0.75rem; border-radius: 6px; }
.notice.success { background: #dcfce7; color: #166534; }
.notice.warning { background: #fef9c3; color: #854d0e; }
.notice.error { background: #fee2e2; color: #991b1b; }
.result { margin-top: 0.5rem; font-family: inherit; }
";

fn render_page(form: &ListingForm, notices: &[Notice], result: Option<&str>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>BienDit - Assistant IA</title>\n<style>",
    );
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<main>\n<h1>BienDit 🏠</h1>\n");
    html.push_str("<p class=\"tagline\">L'assistant de rédaction d'annonces immobilières.</p>\n");

    for notice in notices {
        html.push_str(&format!(
            "<div class=\"{}\">{}</div>\n",
            notice.class(),
            escape_html(&notice.text)
        ));
    }

    html.push_str("<form method=\"post\" action=\"/generate\">\n");
    push_input(
        &mut html,
        "property_type",
        "Type de bien",
        &form.property_type,
        "Ex: T3",
    );
    push_input(&mut html, "city", "Ville", &form.city, "Ex: Lyon 6ème");
    push_number(&mut html, "surface_area", "Surface (m²)", &form.surface_area);
    push_input(&mut html, "price", "Prix (Optionnel)", &form.price, "");
    push_textarea(
        &mut html,
        "strengths",
        "Points Forts",
        &form.strengths,
        "Ex: Lumineux, balcon, calme...",
    );
    push_input(
        &mut html,
        "weaknesses",
        "Points Faibles (Optionnel)",
        &form.weaknesses,
        "",
    );
    html.push_str("<button type=\"submit\">Générer l'annonce ✨</button>\n</form>\n");

    if let Some(text) = result {
        html.push_str("<h2>Résultat</h2>\n");
        html.push_str(&format!(
            "<textarea class=\"result\" readonly rows=\"14\">{}</textarea>\n",
            escape_html(text)
        ));
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn push_input(html: &mut String, name: &str, label: &str, value: &str, placeholder: &str) {
    html.push_str(&format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input id=\"{name}\" name=\"{name}\" type=\"text\" value=\"{}\" placeholder=\"{}\">\n",
        escape_html(value),
        escape_html(placeholder)
    ));
}

fn push_number(html: &mut String, name: &str, label: &str, value: &str) {
    html.push_str(&format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input id=\"{name}\" name=\"{name}\" type=\"number\" min=\"0\" step=\"1\" value=\"{}\">\n",
        escape_html(value)
    ));
}

fn push_textarea(html: &mut String, name: &str, label: &str, value: &str, placeholder: &str) {
    html.push_str(&format!(
        "<label for=\"{name}\">{label}</label>\n\
         <textarea id=\"{name}\" name=\"{name}\" rows=\"4\" placeholder=\"{}\">{}</textarea>\n",
        escape_html(placeholder),
        escape_html(value)
    ));
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape_html("<script>\"l'annonce\" & co</script>"),
            "&lt;script&gt;&quot;l&#39;annonce&quot; &amp; co&lt;/script&gt;"
        );
    }

    #[test]
    fn blank_surface_defaults_to_zero() {
        let form = ListingForm {
            property_type: "T3".to_string(),
            city: "Lyon".to_string(),
            strengths: "Lumineux".to_string(),
            surface_area: "  ".to_string(),
            ..ListingForm::default()
        };
        let input = form.parse().expect("form should parse");
        assert_eq!(input.surface_area, 0);
    }

    #[test]
    fn non_numeric_surface_is_rejected() {
        let form = ListingForm {
            surface_area: "soixante".to_string(),
            ..ListingForm::default()
        };
        let err = form.parse().expect_err("surface should be rejected");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn negative_surface_is_rejected() {
        let form = ListingForm {
            surface_area: "-5".to_string(),
            ..ListingForm::default()
        };
        assert!(form.parse().is_err());
    }

    #[test]
    fn page_contains_the_form_fields() {
        let page = render_page(&ListingForm::default(), &[], None);
        for label in [
            "Type de bien",
            "Ville",
            "Surface (m²)",
            "Prix (Optionnel)",
            "Points Forts",
            "Points Faibles (Optionnel)",
        ] {
            assert!(page.contains(label), "page should contain {label:?}");
        }
        assert!(page.contains("Générer l'annonce"));
    }

    #[test]
    fn result_block_is_escaped() {
        let page = render_page(
            &ListingForm::default(),
            &[],
            Some("<b>T3 LUMINEUX</b>"),
        );
        assert!(page.contains("&lt;b&gt;T3 LUMINEUX&lt;/b&gt;"));
        assert!(!page.contains("<b>T3 LUMINEUX</b>"));
    }

    #[test]
    fn submitted_values_are_preserved_in_the_form() {
        let form = ListingForm {
            property_type: "T3".to_string(),
            city: "Lyon 6ème".to_string(),
            ..ListingForm::default()
        };
        let page = render_page(&form, &[], None);
        assert!(page.contains("value=\"T3\""));
        assert!(page.contains("value=\"Lyon 6ème\""));
    }
}
