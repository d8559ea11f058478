//! Variable substitution for pitch templates.
//!
//! Templates contain `{key}` tokens that are replaced with caller-supplied
//! values. Replacement is a single left-to-right pass over the template, so
//! a replacement value is never re-scanned for tokens.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("valid token regex");
}

/// Variables available to a template.
///
/// A key can be present but unset (renders as an empty string), which is
/// distinct from a key that was never registered (its token is left intact).
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    vars: HashMap<String, Option<String>>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key with a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), Some(value.into()));
    }

    /// Register a key with an optional value. `None` renders as an empty
    /// string wherever the token appears.
    pub fn set_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        self.vars.insert(key.into(), value.map(Into::into));
    }

    fn get(&self, key: &str) -> Option<&Option<String>> {
        self.vars.get(key)
    }
}

/// Replace every `{key}` token in `template` with its value from `vars`.
///
/// Every occurrence of a registered key is replaced; tokens whose key was
/// never registered are left unreplaced. Replacement is literal: values are
/// not expanded further, so rendering is stable under repeated application.
pub fn render_template(template: &str, vars: &TemplateVars) -> String {
    TOKEN_RE
        .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
            Some(Some(value)) => value.clone(),
            Some(None) => String::new(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
