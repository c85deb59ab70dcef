use crate::core::{Assignment, MessageTemplate, Result};
use crate::utils::error::SantaError;
use std::path::Path;
use tera::{Context, Tera};

pub const DEFAULT_TEMPLATE_PATH: &str = "./templates/email_template.html";

/// A single Tera template. The render context exposes `giver` and
/// `recipient`, each with `name`, `email` and `wishlist`.
pub struct TeraTemplate {
    engine: Tera,
    name: String,
}

impl TeraTemplate {
    /// Loads the template once. Templates whose file name ends in `.html`
    /// are auto-escaped.
    pub fn load(path: &Path) -> Result<Self> {
        let path_label = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|e| SantaError::TemplateLoad {
            path: path_label.clone(),
            message: e.to_string(),
        })?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("email_template.html")
            .to_string();

        Self::from_source(&name, &source).map_err(|e| match e {
            SantaError::TemplateLoad { message, .. } => SantaError::TemplateLoad {
                path: path_label,
                message,
            },
            other => other,
        })
    }

    pub fn from_source(name: &str, source: &str) -> Result<Self> {
        let mut engine = Tera::default();
        engine
            .add_raw_template(name, source)
            .map_err(|e| SantaError::TemplateLoad {
                path: name.to_string(),
                message: describe(&e),
            })?;

        Ok(Self {
            engine,
            name: name.to_string(),
        })
    }
}

impl MessageTemplate for TeraTemplate {
    fn render(&self, assignment: &Assignment) -> Result<String> {
        let context = Context::from_serialize(assignment).map_err(|e| SantaError::TemplateRender {
            message: describe(&e),
        })?;

        self.engine
            .render(&self.name, &context)
            .map_err(|e| SantaError::TemplateRender {
                message: describe(&e),
            })
    }
}

// Tera keeps the useful detail (missing variable, bad filter) in the source chain.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Participant;
    use std::io::Write;

    fn assignment() -> Assignment {
        Assignment {
            giver: Participant::new("A", "a@x.org"),
            recipient: Participant::new("B", "b@x.org")
                .with_wishlist(vec!["socks".to_string(), "<b>tea</b>".to_string()]),
        }
    }

    #[test]
    fn test_render_names() {
        let template = TeraTemplate::from_source(
            "test",
            "Hi {{ giver.name }} your match is {{ recipient.name }}!",
        )
        .unwrap();

        assert_eq!(template.render(&assignment()).unwrap(), "Hi A your match is B!");
    }

    #[test]
    fn test_unknown_field_fails() {
        let template =
            TeraTemplate::from_source("test", "Hi {{ giver.name }}, buy for {{ recipient.age }}")
                .unwrap();

        match template.render(&assignment()) {
            Err(SantaError::TemplateRender { message }) => {
                assert!(message.contains("recipient.age"), "{}", message)
            }
            other => panic!("expected a render error, got {:?}", other),
        }
    }

    #[test]
    fn test_wishlist_loop() {
        let template = TeraTemplate::from_source(
            "test",
            "{% for item in recipient.wishlist %}[{{ item }}]{% endfor %}",
        )
        .unwrap();

        assert_eq!(template.render(&assignment()).unwrap(), "[socks][<b>tea</b>]");
    }

    #[test]
    fn test_html_templates_are_escaped() {
        let template = TeraTemplate::from_source(
            "mail.html",
            "{% for item in recipient.wishlist %}{{ item }};{% endfor %}",
        )
        .unwrap();

        let body = template.render(&assignment()).unwrap();
        assert!(body.starts_with("socks;&lt;b&gt;tea"), "{}", body);
        assert!(!body.contains("<b>"));
    }

    #[test]
    fn test_syntax_error_fails_to_load() {
        let result = TeraTemplate::from_source("broken", "Hi {{ giver.name ");
        assert!(matches!(result, Err(SantaError::TemplateLoad { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "{{{{ giver.email }}}} -> {{{{ recipient.email }}}}").unwrap();

        let template = TeraTemplate::load(file.path()).unwrap();

        assert_eq!(template.render(&assignment()).unwrap(), "a@x.org -> b@x.org");
    }

    #[test]
    fn test_load_missing_file() {
        let result = TeraTemplate::load(Path::new("/definitely/not/here.html"));
        match result {
            Err(SantaError::TemplateLoad { path, .. }) => assert!(path.ends_with("here.html")),
            _ => panic!("expected a load error"),
        }
    }
}
