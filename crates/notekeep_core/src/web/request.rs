//! Incoming request model.
//!
//! Method dispatch and body parsing are the host framework's job; by the
//! time a request reaches core it is a verb, a path, and decoded form
//! fields.

use std::collections::HashMap;

/// Request verbs the note surface reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// One incoming request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub form: HashMap<String, String>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            form: HashMap::new(),
        }
    }

    pub fn post(path: impl Into<String>, form: HashMap<String, String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            form,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            form: HashMap::new(),
        }
    }

    /// Returns a form field, treating blank values as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}
