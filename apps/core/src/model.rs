use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single entry of the jump list: what the shell launches and how it is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchableReference {
    pub target: PathBuf,
    pub arguments: String,
    pub title: String,
    pub icon: IconLocation,
    pub description: Option<String>,
}

impl LaunchableReference {
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconLocation {
    pub path: PathBuf,
    pub index: u32,
}

/// How the factory picks the executable a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// Fixed system loader; the destination is invoked indirectly.
    SystemLoader,
    /// Host executable rewritten to its 8.3 short form.
    HostShort,
    /// Host executable, long form.
    HostLong,
}

/// Insertion-ordered references waiting to be handed to the destination list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedCollection {
    items: Vec<LaunchableReference>,
}

impl OrderedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, link: LaunchableReference) {
        self.items.push(link);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaunchableReference> {
        self.items.iter()
    }

    /// Consumes the collection into the immutable array submitted to the service.
    pub fn into_snapshot(self) -> Box<[LaunchableReference]> {
        self.items.into_boxed_slice()
    }
}

impl FromIterator<LaunchableReference> for OrderedCollection {
    fn from_iter<T: IntoIterator<Item = LaunchableReference>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Entries the user removed from the list, as reported when the transaction began.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovedSnapshot {
    items: Box<[LaunchableReference]>,
}

impl RemovedSnapshot {
    pub fn new(items: Vec<LaunchableReference>) -> Self {
        Self {
            items: items.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removed entries are identified by their argument string.
    pub fn contains_arguments(&self, arguments: &str) -> bool {
        self.items.iter().any(|item| item.arguments == arguments)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownCategory {
    Recent,
    Frequent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryClassification {
    RecentDocuments,
    FrequentDocuments,
}

impl HistoryClassification {
    pub const ALL: [Self; 2] = [Self::RecentDocuments, Self::FrequentDocuments];

    pub fn label(self) -> &'static str {
        match self {
            Self::RecentDocuments => "recent",
            Self::FrequentDocuments => "frequent",
        }
    }
}
