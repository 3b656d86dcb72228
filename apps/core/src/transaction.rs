use log::{debug, warn};
use thiserror::Error;

use crate::destinations::{DestinationListService, ServiceError};
use crate::model::{KnownCategory, OrderedCollection, RemovedSnapshot};

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("failed to begin list: {0}")]
    Begin(#[source] ServiceError),
    #[error("list left uncommitted; failed categories: {}", .0.join(", "))]
    CategoriesFailed(Vec<String>),
    #[error("failed to commit list: {0}")]
    Commit(#[source] ServiceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Begun,
    Populated,
    Committed,
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCategory {
    pub name: String,
    pub links: OrderedCollection,
}

/// Everything one list build appends. Non-task categories go in the order
/// recent, frequent, bookmarks, playlist; tasks always land in the trailing
/// tasks region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    pub recent: bool,
    pub frequent: bool,
    pub bookmarks: Option<NamedCategory>,
    pub playlist: Option<NamedCategory>,
    pub tasks: Option<OrderedCollection>,
}

/// One begin/populate/commit cycle against a destination list.
///
/// Dropping the transaction without a successful commit aborts it, leaving
/// the previously committed list untouched.
pub struct ListTransaction<'s, S: DestinationListService + ?Sized> {
    service: &'s mut S,
    state: TransactionState,
    min_slots: u32,
    removed: RemovedSnapshot,
    appended: Vec<String>,
    failed: Vec<String>,
}

impl<'s, S: DestinationListService + ?Sized> ListTransaction<'s, S> {
    pub fn begin(service: &'s mut S) -> Result<Self, TransactionError> {
        let session = service.begin_list().map_err(TransactionError::Begin)?;
        debug!(
            "list transaction begun: min_slots={} removed={}",
            session.min_slots,
            session.removed.len()
        );
        Ok(Self {
            service,
            state: TransactionState::Begun,
            min_slots: session.min_slots,
            removed: session.removed,
            appended: Vec::new(),
            failed: Vec::new(),
        })
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn min_slots(&self) -> u32 {
        self.min_slots
    }

    /// Removed entries as of `begin`; never refreshed during the transaction.
    pub fn removed(&self) -> &RemovedSnapshot {
        &self.removed
    }

    pub fn appended(&self) -> &[String] {
        &self.appended
    }

    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn populate(&mut self, population: Population) {
        if population.recent {
            let result = self.service.append_known_category(KnownCategory::Recent);
            self.record("recent", result);
        }
        if population.frequent {
            let result = self.service.append_known_category(KnownCategory::Frequent);
            self.record("frequent", result);
        }
        if let Some(category) = population.bookmarks {
            self.append_named(category);
        }
        if let Some(category) = population.playlist {
            self.append_named(category);
        }
        if let Some(tasks) = population.tasks {
            let result = self.service.add_user_tasks(tasks.into_snapshot());
            self.record("tasks", result);
        }
        self.state = TransactionState::Populated;
    }

    /// Commits when every append so far succeeded.
    pub fn commit(mut self) -> Result<(), TransactionError> {
        if !self.failed.is_empty() {
            return Err(TransactionError::CategoriesFailed(std::mem::take(
                &mut self.failed,
            )));
        }
        self.service
            .commit_list()
            .map_err(TransactionError::Commit)?;
        self.state = TransactionState::Committed;
        Ok(())
    }

    fn append_named(&mut self, category: NamedCategory) {
        let result = self
            .service
            .append_category(&category.name, category.links.into_snapshot());
        self.record(&category.name, result);
    }

    fn record(&mut self, name: &str, result: Result<(), ServiceError>) {
        match result {
            Ok(()) => self.appended.push(name.to_string()),
            Err(error) => {
                warn!("failed to append category '{name}': {error}");
                self.failed.push(name.to_string());
            }
        }
    }
}

impl<S: DestinationListService + ?Sized> Drop for ListTransaction<'_, S> {
    fn drop(&mut self) {
        if matches!(
            self.state,
            TransactionState::Committed | TransactionState::Aborted
        ) {
            return;
        }
        self.state = TransactionState::Aborted;
        if let Err(error) = self.service.abort_list() {
            warn!("failed to abort list transaction: {error}");
        }
    }
}
