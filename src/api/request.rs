//! Request description and query string construction.

use serde_json::Value;

use crate::constants::{IdType, METHOD_PREFIX};

/// The entity a call is made against, sent as `{id_type}={value}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub id_type: IdType,
    pub value: String,
}

impl Identity {
    pub fn new(id_type: IdType, value: impl Into<String>) -> Self {
        Self {
            id_type,
            value: value.into(),
        }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self::new(IdType::User, id)
    }

    pub fn set(id: impl Into<String>) -> Self {
        Self::new(IdType::Set, id)
    }

    pub fn photo(id: impl Into<String>) -> Self {
        Self::new(IdType::Photo, id)
    }
}

/// How to perform one API method call and what part of the response to keep.
///
/// The selector is a JSON pointer into the full response envelope, e.g.
/// `/collections/collection`. A pointer that resolves to nothing is a
/// response shape failure and is never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub select: &'static str,
    /// Whether to OAuth sign the request
    pub sign: bool,
    /// Whether the result can be cached, subject to global configuration
    pub allow_cache: bool,
    /// Additional query string parameters, in the order given
    pub params: Vec<(String, String)>,
}

impl Request {
    pub fn new(select: &'static str) -> Self {
        Self {
            select,
            sign: false,
            allow_cache: false,
            params: Vec::new(),
        }
    }

    pub fn signed(mut self) -> Self {
        self.sign = true;
        self
    }

    pub fn allow_cache(mut self, allow: bool) -> Self {
        self.allow_cache = allow;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        set_param(&mut self.params, key.into(), value.to_string());
        self
    }

    /// Extract the selected sub-value from a successful response.
    pub fn select<'a>(&self, response: &'a Value) -> Option<&'a Value> {
        response.pointer(self.select)
    }
}

/// Insert a parameter, replacing the value in place when the key exists so
/// the original position is kept.
fn set_param(params: &mut Vec<(String, String)>, key: String, value: String) {
    match params.iter_mut().find(|(k, _)| *k == key) {
        Some(existing) => existing.1 = value,
        None => params.push((key, value)),
    }
}

/// Build the query string, including the leading `?`.
///
/// Order is fixed: caller parameters as given, then `api_key`, `format`,
/// `nojsoncallback` and `method`, then the identity parameter. Cache keys and
/// request matching in tests rely on the output being reproducible.
pub fn parameterize(
    method: &str,
    identity: Option<&Identity>,
    params: &[(String, String)],
    api_key: &str,
) -> String {
    let mut all = params.to_vec();
    set_param(&mut all, "api_key".to_string(), api_key.to_string());
    set_param(&mut all, "format".to_string(), "json".to_string());
    set_param(&mut all, "nojsoncallback".to_string(), "1".to_string());
    set_param(&mut all, "method".to_string(), format!("{}{}", METHOD_PREFIX, method));

    if let Some(id) = identity {
        set_param(&mut all, id.id_type.as_str().to_string(), id.value.clone());
    }

    let mut qs = String::new();
    for (i, (key, value)) in all.iter().enumerate() {
        qs.push(if i == 0 { '?' } else { '&' });
        qs.push_str(key);
        qs.push('=');
        qs.push_str(&urlencoding::encode(value));
    }
    qs
}
