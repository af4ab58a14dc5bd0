//! Origin equivalence between two parsed remotes

use std::collections::HashMap;

use crate::remote::RemoteUri;

/// Whether two remotes denote the same logical repository
///
/// Hosts must match after lowercasing and paths must match exactly.
/// Scheme, user, port, query and fragment are ignored.
pub fn are_same_origin(a: &RemoteUri, b: &RemoteUri) -> bool {
    a.canonical_host() == b.canonical_host() && a.path() == b.path()
}

/// Origin comparison with optional host aliases
///
/// With no aliases this is exactly [`are_same_origin`]. An alias group
/// declares several hostnames as one server, e.g. after a host migration.
/// Paths are never aliased.
#[derive(Debug, Clone, Default)]
pub struct OriginComparator {
    /// lowercased host -> index of its alias group
    aliases: HashMap<String, usize>,
}

impl OriginComparator {
    /// Strict comparator: host and path must both match
    pub fn strict() -> Self {
        Self::default()
    }

    /// Comparator that treats each group of hosts as one host
    ///
    /// A host listed in more than one group joins the first group it
    /// appears in.
    pub fn with_host_aliases<G, H>(groups: G) -> Self
    where
        G: IntoIterator<Item = H>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        let mut aliases = HashMap::new();
        for (index, group) in groups.into_iter().enumerate() {
            for host in group {
                aliases
                    .entry(host.as_ref().to_ascii_lowercase())
                    .or_insert(index);
            }
        }
        Self { aliases }
    }

    pub fn has_aliases(&self) -> bool {
        !self.aliases.is_empty()
    }

    pub fn are_same_origin(&self, a: &RemoteUri, b: &RemoteUri) -> bool {
        a.path() == b.path() && self.same_host(a.canonical_host(), b.canonical_host())
    }

    fn same_host(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        match (self.aliases.get(a), self.aliases.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}
