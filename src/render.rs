//! User-list page rendering.
//!
//! The template file is re-read and re-parsed on every render so the
//! page can be edited while the service is running.
//!
//! Template grammar: everything between `{{#users}}` and `{{/users}}`
//! is repeated once per user, with `{{id}}`, `{{name}}` and
//! `{{surname}}` substituted. Values are HTML-escaped.

use crate::error::RenderError;
use crate::storage::User;
use std::path::Path;
use tokio::fs;

const SECTION_OPEN: &str = "{{#users}}";
const SECTION_CLOSE: &str = "{{/users}}";

/// A parsed user-list template, split around the row section.
pub struct UserListTemplate {
    prefix: String,
    row: String,
    suffix: String,
}

impl UserListTemplate {
    /// Read and parse the template from disk.
    pub async fn load(path: &Path) -> Result<Self, RenderError> {
        let source = fs::read_to_string(path)
            .await
            .map_err(|source| RenderError::Read {
                path: path.display().to_string(),
                source,
            })?;
        Self::parse(&source)
    }

    pub fn parse(source: &str) -> Result<Self, RenderError> {
        let open = source.find(SECTION_OPEN).ok_or_else(|| {
            RenderError::Parse(format!("missing {SECTION_OPEN} section marker"))
        })?;
        let after_open = open + SECTION_OPEN.len();
        let close = source[after_open..].find(SECTION_CLOSE).ok_or_else(|| {
            RenderError::Parse(format!("missing {SECTION_CLOSE} section marker"))
        })?;

        Ok(Self {
            prefix: source[..open].to_string(),
            row: source[after_open..after_open + close].to_string(),
            suffix: source[after_open + close + SECTION_CLOSE.len()..].to_string(),
        })
    }

    /// Apply the template to a list of users.
    pub fn render(&self, users: &[User]) -> String {
        let mut out = String::with_capacity(
            self.prefix.len() + self.suffix.len() + self.row.len() * users.len(),
        );
        out.push_str(&self.prefix);
        for user in users {
            let row = self
                .row
                .replace("{{id}}", &user.id.to_string())
                .replace("{{name}}", &escape_html(&user.name))
                .replace("{{surname}}", &escape_html(&user.surname));
            out.push_str(&row);
        }
        out.push_str(&self.suffix);
        out
    }
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
