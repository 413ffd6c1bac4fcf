//! CSRF Token Lookup
//!
//! The page may expose the token in three places; the first non-empty one
//! wins: the `csrftoken` cookie, the `csrfmiddlewaretoken` hidden input,
//! then the `csrf-token` meta tag.

use percent_encoding::percent_decode_str;

pub const CSRF_COOKIE: &str = "csrftoken";

/// Raw values read from the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfSources {
    /// The whole `document.cookie` string
    pub cookie_header: Option<String>,
    pub form_field: Option<String>,
    pub meta_tag: Option<String>,
}

impl CsrfSources {
    pub fn resolve(&self) -> Option<String> {
        self.cookie_header
            .as_deref()
            .and_then(|header| cookie_value(header, CSRF_COOKIE))
            .or_else(|| non_empty(self.form_field.as_deref()))
            .or_else(|| non_empty(self.meta_tag.as_deref()))
    }
}

/// Percent-decoded value of one cookie in a `name=value; ...` header
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}
