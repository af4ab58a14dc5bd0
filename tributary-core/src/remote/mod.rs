//! Version-control remote addresses
//!
//! A [`RemoteUri`] is the parsed, normalized form of one raw remote string
//! such as `ssh://git@example.com/repo.git` or `git@example.com:repo.git`.
//! Values are built fresh from the raw string on every verification and are
//! never mutated afterwards.

mod parser;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub use parser::{parse, redact, ParseError};

/// Transport dialect a remote was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    /// `ssh://`, `git+ssh://` or `ssh+git://`
    Ssh,
    /// `https://`
    Https,
    /// `http://`
    Http,
    /// `git://`
    Git,
    /// `[user@]host:path` shorthand with no explicit scheme
    ScpLike,
}

impl Scheme {
    /// Look up an explicit URL scheme, case-insensitively
    pub fn from_url_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "ssh" | "git+ssh" | "ssh+git" => Some(Scheme::Ssh),
            "https" => Some(Scheme::Https),
            "http" => Some(Scheme::Http),
            "git" => Some(Scheme::Git),
            _ => None,
        }
    }

    /// Name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Ssh => "ssh",
            Scheme::Https => "https",
            Scheme::Http => "http",
            Scheme::Git => "git",
            Scheme::ScpLike => "scp-like",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed remote address
///
/// Only [`canonical_host`](Self::canonical_host) and [`path`](Self::path)
/// take part in origin comparison. Everything else is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteUri {
    raw: String,
    scheme: Scheme,
    user: Option<String>,
    host: String,
    canonical_host: String,
    port: Option<u16>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl RemoteUri {
    /// Parse a raw remote string in any supported dialect
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        parser::parse(raw)
    }

    /// The string this value was parsed from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Authentication principal, if one was written
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Host as written in the raw string
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Lowercased host used for comparison
    pub fn canonical_host(&self) -> &str {
        &self.canonical_host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Repository path without surrounding slashes or a trailing `.git`
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// `host/path` form used in logs and fault messages
    pub fn identity(&self) -> String {
        format!("{}/{}", self.canonical_host, self.path)
    }
}

impl fmt::Display for RemoteUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scheme == Scheme::ScpLike {
            if let Some(user) = &self.user {
                write!(f, "{}@", user)?;
            }
            return write!(f, "{}:{}", self.canonical_host, self.path);
        }

        write!(f, "{}://", self.scheme)?;
        if let Some(user) = &self.user {
            write!(f, "{}@", user)?;
        }
        write!(f, "{}", self.canonical_host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        write!(f, "/{}", self.path)
    }
}

impl FromStr for RemoteUri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}
