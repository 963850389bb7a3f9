//! Transport kinds, HTTP methods and expected status codes.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// HTTP methods offered by the method selector, in menu order.
pub const METHODS: [HttpMethod; 7] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Delete,
    HttpMethod::Options,
    HttpMethod::Patch,
    HttpMethod::Head,
];

/// Expected status codes offered by the status selector.
pub const STATUS_LIST: [u16; 8] = [200, 301, 403, 404, 500, 502, 503, 504];

/// Entries of the interface type selector.
pub const INTERFACE_TYPE: [TypeChoice; 3] =
    [TypeChoice::Http, TypeChoice::Socket, TypeChoice::Other];

/// Interface types with a dedicated selector entry. Anything else is a custom label.
pub const KNOWN_INTERFACE_TYPE: [&str; 2] = [HTTP, SOCKET];

pub const HTTP: &str = "HTTP";
pub const SOCKET: &str = "SOCKET";
pub const OTHER: &str = "OTHER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Patch,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown HTTP method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    /// Exact match against the selector values, so a stored method is never
    /// rewritten on its way back to the backend.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        METHODS
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// Whether `status` is one of the selectable expected status codes.
pub fn is_known_status(status: u16) -> bool {
    STATUS_LIST.contains(&status)
}

/// Value shown by the interface type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeChoice {
    Http,
    Socket,
    Other,
}

impl TypeChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeChoice::Http => HTTP,
            TypeChoice::Socket => SOCKET,
            TypeChoice::Other => OTHER,
        }
    }

    /// Maps a raw `interface_type` onto its selector entry.
    pub fn of(interface_type: &str) -> Self {
        match interface_type {
            HTTP => TypeChoice::Http,
            SOCKET => TypeChoice::Socket,
            _ => TypeChoice::Other,
        }
    }
}

/// Typed view of an interface's transport.
///
/// Only `Http` carries url/method/status, so a non-HTTP interface cannot be
/// flattened into a wire record that still holds HTTP-only values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceKind {
    Http {
        url: String,
        method: HttpMethod,
        status: Option<u16>,
    },
    Socket,
    Other(String),
}

impl InterfaceKind {
    /// The wire value of `interface_type`.
    pub fn type_label(&self) -> &str {
        match self {
            InterfaceKind::Http { .. } => HTTP,
            InterfaceKind::Socket => SOCKET,
            InterfaceKind::Other(label) => label,
        }
    }
}
