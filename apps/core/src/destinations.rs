use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{HistoryClassification, KnownCategory, LaunchableReference, RemovedSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("destination service unavailable: {0}")]
    Unavailable(String),
    #[error("{operation} rejected by destination service (code {code:#x})")]
    Rejected { operation: &'static str, code: u32 },
    #[error("no list transaction is open")]
    NoTransaction,
    #[error("a list transaction is already open")]
    TransactionOpen,
}

/// What the service hands back when a list transaction starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSession {
    pub min_slots: u32,
    pub removed: RemovedSnapshot,
}

/// Per-application custom destination list.
///
/// `begin_list` opens a transaction; nothing appended becomes visible until
/// `commit_list`. `abort_list` drops the pending transaction and leaves the
/// previously committed list in place.
pub trait DestinationListService {
    fn begin_list(&mut self) -> Result<ListSession, ServiceError>;
    fn append_known_category(&mut self, kind: KnownCategory) -> Result<(), ServiceError>;
    fn append_category(
        &mut self,
        name: &str,
        links: Box<[LaunchableReference]>,
    ) -> Result<(), ServiceError>;
    fn add_user_tasks(&mut self, links: Box<[LaunchableReference]>) -> Result<(), ServiceError>;
    fn commit_list(&mut self) -> Result<(), ServiceError>;
    fn abort_list(&mut self) -> Result<(), ServiceError>;
    fn delete_list(&mut self) -> Result<(), ServiceError>;
}

/// One entry of the shell's recent/frequent history for an application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DestinationRecord {
    pub path: String,
}

impl DestinationRecord {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}

pub trait DestinationHistoryService {
    /// Records for `app_id`, most recent first.
    fn records(
        &self,
        app_id: &str,
        classification: HistoryClassification,
    ) -> Result<Vec<DestinationRecord>, ServiceError>;

    fn remove_record(&mut self, app_id: &str, record: &DestinationRecord)
        -> Result<(), ServiceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListSection {
    Known { category: KnownCategory },
    Custom {
        name: String,
        links: Vec<LaunchableReference>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedList {
    pub sections: Vec<ListSection>,
    pub tasks: Vec<LaunchableReference>,
}

/// Failures the in-memory list injects on request.
#[derive(Debug, Clone, Default)]
pub struct ListFailures {
    pub begin: bool,
    pub categories: HashSet<String>,
    pub tasks: bool,
    pub commit: bool,
}

const E_FAIL: u32 = 0x8000_4005;

/// In-memory destination list with the shell's transactional semantics.
#[derive(Debug, Default)]
pub struct MemoryDestinationList {
    committed: Option<CommittedList>,
    pending: Option<CommittedList>,
    removed: Vec<LaunchableReference>,
    min_slots: u32,
    pub failures: ListFailures,
    begun: usize,
    commits: usize,
    aborts: usize,
}

impl MemoryDestinationList {
    pub fn new(min_slots: u32) -> Self {
        Self {
            min_slots,
            ..Self::default()
        }
    }

    pub fn with_removed(mut self, removed: Vec<LaunchableReference>) -> Self {
        self.removed = removed;
        self
    }

    /// Marks an entry as removed by the user; later transactions report it.
    pub fn remove_by_user(&mut self, link: LaunchableReference) {
        self.removed.push(link);
    }

    pub fn committed(&self) -> Option<&CommittedList> {
        self.committed.as_ref()
    }

    pub fn open_transactions(&self) -> usize {
        usize::from(self.pending.is_some())
    }

    pub fn begun_count(&self) -> usize {
        self.begun
    }

    pub fn commit_count(&self) -> usize {
        self.commits
    }

    pub fn abort_count(&self) -> usize {
        self.aborts
    }

    fn pending_mut(&mut self) -> Result<&mut CommittedList, ServiceError> {
        self.pending.as_mut().ok_or(ServiceError::NoTransaction)
    }
}

impl DestinationListService for MemoryDestinationList {
    fn begin_list(&mut self) -> Result<ListSession, ServiceError> {
        if self.failures.begin {
            return Err(ServiceError::Rejected {
                operation: "BeginList",
                code: E_FAIL,
            });
        }
        if self.pending.is_some() {
            return Err(ServiceError::TransactionOpen);
        }

        self.pending = Some(CommittedList::default());
        self.begun += 1;
        Ok(ListSession {
            min_slots: self.min_slots,
            removed: RemovedSnapshot::new(self.removed.clone()),
        })
    }

    fn append_known_category(&mut self, kind: KnownCategory) -> Result<(), ServiceError> {
        self.pending_mut()?
            .sections
            .push(ListSection::Known { category: kind });
        Ok(())
    }

    fn append_category(
        &mut self,
        name: &str,
        links: Box<[LaunchableReference]>,
    ) -> Result<(), ServiceError> {
        if self.failures.categories.contains(name) {
            return Err(ServiceError::Rejected {
                operation: "AppendCategory",
                code: E_FAIL,
            });
        }
        self.pending_mut()?.sections.push(ListSection::Custom {
            name: name.to_string(),
            links: links.into_vec(),
        });
        Ok(())
    }

    fn add_user_tasks(&mut self, links: Box<[LaunchableReference]>) -> Result<(), ServiceError> {
        if self.failures.tasks {
            return Err(ServiceError::Rejected {
                operation: "AddUserTasks",
                code: E_FAIL,
            });
        }
        self.pending_mut()?.tasks.extend(links.into_vec());
        Ok(())
    }

    fn commit_list(&mut self) -> Result<(), ServiceError> {
        if self.failures.commit {
            return Err(ServiceError::Rejected {
                operation: "CommitList",
                code: E_FAIL,
            });
        }
        let list = self.pending.take().ok_or(ServiceError::NoTransaction)?;
        self.committed = Some(list);
        self.commits += 1;
        Ok(())
    }

    fn abort_list(&mut self) -> Result<(), ServiceError> {
        self.pending.take().ok_or(ServiceError::NoTransaction)?;
        self.aborts += 1;
        Ok(())
    }

    fn delete_list(&mut self) -> Result<(), ServiceError> {
        self.committed = None;
        self.removed.clear();
        Ok(())
    }
}

/// In-memory recent/frequent history keyed by application identity.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    records: HashMap<(String, HistoryClassification), Vec<DestinationRecord>>,
    pub unavailable: bool,
    pub failing: HashSet<DestinationRecord>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        app_id: &str,
        classification: HistoryClassification,
        records: Vec<DestinationRecord>,
    ) {
        self.records
            .insert((app_id.to_string(), classification), records);
    }

    pub fn len(&self, app_id: &str, classification: HistoryClassification) -> usize {
        self.records
            .get(&(app_id.to_string(), classification))
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl DestinationHistoryService for MemoryHistory {
    fn records(
        &self,
        app_id: &str,
        classification: HistoryClassification,
    ) -> Result<Vec<DestinationRecord>, ServiceError> {
        if self.unavailable {
            return Err(ServiceError::Unavailable(
                "application document lists".to_string(),
            ));
        }
        Ok(self
            .records
            .get(&(app_id.to_string(), classification))
            .cloned()
            .unwrap_or_default())
    }

    fn remove_record(
        &mut self,
        app_id: &str,
        record: &DestinationRecord,
    ) -> Result<(), ServiceError> {
        if self.failing.contains(record) {
            return Err(ServiceError::Rejected {
                operation: "RemoveDestination",
                code: E_FAIL,
            });
        }

        // The shell drops a destination from every list it appears in.
        for ((owner, _), records) in self.records.iter_mut() {
            if owner == app_id {
                records.retain(|candidate| candidate != record);
            }
        }
        Ok(())
    }
}
