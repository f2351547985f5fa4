//! Subject taxonomy: hierarchical book domains.
//!
//! Domains reference their parent by id, never by pointer. The whole tree
//! lives in a [`DomainTree`] arena and every upward walk goes through
//! [`DomainTree::ancestors`], which tracks visited ids so corrupted (cyclic)
//! data ends in an error instead of an endless loop.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{error::DomainError, value_objects::DomainId};

/// A node of the subject taxonomy. `parent_id == None` marks a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDomain {
    pub id: DomainId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<DomainId>,
}

impl BookDomain {
    pub fn root(id: impl Into<DomainId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn child(
        id: impl Into<DomainId>,
        name: impl Into<String>,
        parent: impl Into<DomainId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: Some(parent.into()),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Arena of domains addressed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainTree {
    nodes: HashMap<DomainId, BookDomain>,
}

impl DomainTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_domains(domains: impl IntoIterator<Item = BookDomain>) -> Self {
        let mut tree = Self::new();
        for domain in domains {
            tree.insert(domain);
        }
        tree
    }

    /// Insert or replace a node, returning the previous one.
    pub fn insert(&mut self, domain: BookDomain) -> Option<BookDomain> {
        self.nodes.insert(domain.id, domain)
    }

    pub fn get(&self, id: DomainId) -> Option<&BookDomain> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: DomainId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every domain, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &BookDomain> {
        self.nodes.values()
    }

    /// Direct subdomains of `id`, in no particular order.
    pub fn children(&self, id: DomainId) -> impl Iterator<Item = &BookDomain> {
        self.nodes
            .values()
            .filter(move |d| d.parent_id == Some(id))
    }

    /// Walk from `domain.parent_id` towards the root.
    ///
    /// A parent id missing from the arena ends the walk. Reaching an id twice
    /// yields [`DomainError::CyclicDomainHierarchy`] once, then stops.
    pub fn ancestors<'a>(&'a self, domain: &'a BookDomain) -> Ancestors<'a> {
        Ancestors {
            tree: self,
            origin: domain,
            next: domain.parent_id,
            visited: HashSet::from([domain.id]),
            done: false,
        }
    }
}

/// Iterator returned by [`DomainTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a DomainTree,
    origin: &'a BookDomain,
    next: Option<DomainId>,
    visited: HashSet<DomainId>,
    done: bool,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Result<&'a BookDomain, DomainError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(id) = self.next else {
            self.done = true;
            return None;
        };

        if !self.visited.insert(id) {
            self.done = true;
            return Some(Err(DomainError::CyclicDomainHierarchy {
                domain: self.origin.name.clone(),
                repeated: id,
            }));
        }

        match self.tree.get(id) {
            Some(parent) => {
                self.next = parent.parent_id;
                Some(Ok(parent))
            }
            None => {
                debug!(domain = %self.origin.id, parent = %id, "Parent domain not in tree, treating as root");
                self.done = true;
                None
            }
        }
    }
}
