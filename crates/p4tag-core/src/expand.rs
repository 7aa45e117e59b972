//! `${NAME}` placeholder expansion against a run environment.
use p4tag_model::Env;

use crate::error::LabelError;

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Template expander bound to one environment snapshot.
///
/// Expansion is raw: values are inserted as-is, with no escaping or quoting.
/// Unknown placeholders are kept literally, since templates may reference
/// optional variables. Substituted values are never expanded again.
#[derive(Debug, Clone, Copy)]
pub struct Expand<'a> {
    env: &'a Env,
}

impl<'a> Expand<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    /// Expand `template`.
    ///
    /// Fails only on malformed syntax: an unterminated `${` or an empty `${}`.
    pub fn format(&self, template: &str) -> Result<String, LabelError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let offset = template.len() - rest.len() + start;
            let after = &rest[start + OPEN.len()..];

            let Some(end) = after.find(CLOSE) else {
                return Err(malformed(
                    template,
                    format!("unterminated placeholder at byte {offset}"),
                ));
            };
            let key = &after[..end];
            if key.is_empty() {
                return Err(malformed(
                    template,
                    format!("empty placeholder at byte {offset}"),
                ));
            }

            match self.env.get(key) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str(OPEN);
                    out.push_str(key);
                    out.push(CLOSE);
                }
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn malformed(template: &str, reason: String) -> LabelError {
    LabelError::TemplateExpansion {
        template: template.to_string(),
        reason,
    }
}
