//! Email template rendering.
//!
//! Templates are keyed by the notification kind's `template_key` and
//! filled from a JSON variables object. Rendering is infallible: a
//! missing variable renders as an empty string rather than failing the
//! flush pass.

use serde_json::Value;

/// A rendered email: subject line plus HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body_html: String,
}

fn var<'a>(variables: &'a Value, key: &str) -> &'a str {
    variables.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Render the template for `template_key`. Unknown keys fall back to a
/// generic notification layout that carries the message through.
pub fn render(template_key: &str, variables: &Value) -> RenderedEmail {
    let company = var(variables, "company_name");
    let message = var(variables, "message");

    match template_key {
        "upcoming_post" => RenderedEmail {
            subject: format!(
                "Reminder: {} post due {}",
                var(variables, "platform"),
                var(variables, "scheduled_date")
            ),
            body_html: format!(
                "<html><body>\
                 <h2>Upcoming post reminder</h2>\
                 <p>Hi {company},</p>\
                 <p>{message}</p>\
                 <p>Scheduled date: <strong>{}</strong> on <strong>{}</strong>.</p>\
                 </body></html>",
                var(variables, "scheduled_date"),
                var(variables, "platform"),
            ),
        },
        "overdue_post" => RenderedEmail {
            subject: format!(
                "Overdue: {} post from {}",
                var(variables, "platform"),
                var(variables, "scheduled_date")
            ),
            body_html: format!(
                "<html><body>\
                 <h2 style=\"color:#c0392b\">Overdue post</h2>\
                 <p>Hi {company},</p>\
                 <p>{message}</p>\
                 <p>This post was due on <strong>{}</strong> and has not been marked sent.</p>\
                 </body></html>",
                var(variables, "scheduled_date"),
            ),
        },
        "special_date" => RenderedEmail {
            subject: format!("Upcoming special date: {}", var(variables, "holiday_name")),
            body_html: format!(
                "<html><body>\
                 <h2>Special date ahead</h2>\
                 <p>Hi {company},</p>\
                 <p>{message}</p>\
                 <p><strong>{}</strong> falls on <strong>{}</strong>.</p>\
                 </body></html>",
                var(variables, "holiday_name"),
                var(variables, "scheduled_date"),
            ),
        },
        "critical_alert" => RenderedEmail {
            subject: "Action required: critical publishing alert".to_string(),
            body_html: format!(
                "<html><body>\
                 <h2 style=\"color:#c0392b\">Critical alert</h2>\
                 <p>Hi {company},</p>\
                 <p>{message}</p>\
                 </body></html>"
            ),
        },
        other => {
            tracing::warn!(template_key = other, "Unknown email template key");
            RenderedEmail {
                subject: "Publishing notification".to_string(),
                body_html: format!(
                    "<html><body><p>Hi {company},</p><p>{message}</p></body></html>"
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upcoming_template_fills_variables() {
        let rendered = render(
            "upcoming_post",
            &json!({
                "company_name": "Acme",
                "message": "Your next post is coming up.",
                "platform": "instagram",
                "scheduled_date": "2026-09-01",
            }),
        );
        assert_eq!(rendered.subject, "Reminder: instagram post due 2026-09-01");
        assert!(rendered.body_html.contains("Hi Acme,"));
        assert!(rendered.body_html.contains("2026-09-01"));
    }

    #[test]
    fn missing_variables_render_empty() {
        let rendered = render("overdue_post", &json!({}));
        assert!(rendered.body_html.contains("Hi ,"));
    }

    #[test]
    fn unknown_key_uses_fallback_layout() {
        let rendered = render("no_such_key", &json!({"message": "hello"}));
        assert_eq!(rendered.subject, "Publishing notification");
        assert!(rendered.body_html.contains("hello"));
    }
}
