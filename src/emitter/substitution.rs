use std::collections::HashMap;

/// Which namespace a [`SubstitutionRegistry`] serves.  Links and images
/// never share names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubstitutionKind {
    Link,
    Image,
}

impl SubstitutionKind {
    /// The reST definition line binding `key` to `target`.
    pub fn definition(self, key: &str, target: &str) -> String {
        match self {
            SubstitutionKind::Link => format!(".. _{}: {}", key, target),
            SubstitutionKind::Image => format!(".. |{}| image:: {}", key, target),
        }
    }
}

/// Outcome of [`SubstitutionRegistry::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// First use of this key; the caller owes a definition line.
    New(String),
    /// The key already points at the same target; only a reference is needed.
    Reused(String),
}

impl Resolution {
    pub fn key(&self) -> &str {
        match self {
            Resolution::New(key) | Resolution::Reused(key) => key,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Resolution::New(_))
    }
}

/// Display key → target bookkeeping for one render pass.
///
/// A key seen again with a different target is retried as `key #1`,
/// `key #2`, ... until a free or matching key turns up, so a name never
/// points at two targets.
#[derive(Debug, Clone)]
pub struct SubstitutionRegistry {
    kind: SubstitutionKind,
    targets: HashMap<String, String>,
}

impl SubstitutionRegistry {
    pub fn new(kind: SubstitutionKind) -> SubstitutionRegistry {
        SubstitutionRegistry {
            kind,
            targets: HashMap::new(),
        }
    }

    pub fn kind(&self) -> SubstitutionKind {
        self.kind
    }

    pub fn resolve(&mut self, key: &str, target: &str) -> Resolution {
        let mut candidate = key.to_string();
        let mut suffix = 1;
        loop {
            match self.targets.get(&candidate) {
                None => {
                    self.targets.insert(candidate.clone(), target.to_string());
                    return Resolution::New(candidate);
                }
                Some(known) if known == target => return Resolution::Reused(candidate),
                Some(_) => {
                    candidate = format!("{} #{}", key, suffix);
                    suffix += 1;
                }
            }
        }
    }

    pub fn definition(&self, key: &str, target: &str) -> String {
        self.kind.definition(key, target)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_same_target_is_reused() {
        let mut links = SubstitutionRegistry::new(SubstitutionKind::Link);
        assert_eq!(links.resolve("home", "/"), Resolution::New("home".to_string()));
        assert_eq!(links.resolve("home", "/"), Resolution::Reused("home".to_string()));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn conflicting_targets_get_numbered_keys() {
        let mut links = SubstitutionRegistry::new(SubstitutionKind::Link);
        links.resolve("docs", "/a");
        assert_eq!(links.resolve("docs", "/b"), Resolution::New("docs #1".to_string()));
        assert_eq!(links.resolve("docs", "/c"), Resolution::New("docs #2".to_string()));
        assert_eq!(links.resolve("docs", "/b"), Resolution::Reused("docs #1".to_string()));
        assert_eq!(links.resolve("docs", "/a"), Resolution::Reused("docs".to_string()));
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn definitions_per_kind() {
        let links = SubstitutionRegistry::new(SubstitutionKind::Link);
        let images = SubstitutionRegistry::new(SubstitutionKind::Image);
        assert_eq!(links.definition("home", "/"), ".. _home: /");
        assert_eq!(images.definition("logo", "/logo.png"), ".. |logo| image:: /logo.png");
    }
}
