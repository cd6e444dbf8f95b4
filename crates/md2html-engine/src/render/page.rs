use super::escape::{escape_attribute, escape_minimal};

/// Standalone HTML document around a rendered body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub title: Option<String>,
    /// Stylesheet href, emitted as a `<link>` in the head
    pub stylesheet: Option<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet = Some(href.into());
        self
    }

    /// Wrap `body` (already rendered markup) in a complete document.
    pub fn wrap(&self, body: &str) -> String {
        let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n");
        if let Some(title) = &self.title {
            out.push_str(&format!("<title>{}</title>\n", escape_minimal(title)));
        }
        if let Some(href) = &self.stylesheet {
            out.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\" />\n",
                escape_attribute(href)
            ));
        }
        out.push_str("</head>\n<body>\n");
        out.push_str(body);
        out.push_str("\n</body>\n</html>\n");
        out
    }
}
