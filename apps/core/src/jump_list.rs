use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::categories::{CategoryBuilder, PlaylistSource, TaskCommands};
use crate::config::Config;
use crate::destinations::{DestinationHistoryService, DestinationListService};
use crate::history::{HistoryPruner, PruneOutcome};
use crate::link::LinkFactory;
use crate::model::HistoryClassification;
use crate::platform::HostLocator;
use crate::transaction::{ListTransaction, NamedCategory, Population, TransactionError};

/// Which categories one build includes and how they are labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    pub recent: bool,
    pub frequent: bool,
    pub tasks: bool,
    pub bookmarks: bool,
    pub playlist: bool,
    pub bookmark_category: String,
    pub playlist_category: String,
    pub play_title: String,
    pub open_title: String,
    pub icon_path: PathBuf,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ListOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            recent: config.recent,
            frequent: config.frequent,
            tasks: config.tasks,
            bookmarks: config.bookmarks,
            playlist: config.playlists,
            bookmark_category: config.bookmark_category.clone(),
            playlist_category: config.playlist_category.clone(),
            play_title: config.play_title.clone(),
            open_title: config.open_title.clone(),
            icon_path: config.icon_path.clone(),
        }
    }

    /// Options with every category switched off.
    pub fn none() -> Self {
        Self {
            recent: false,
            frequent: false,
            tasks: false,
            bookmarks: false,
            playlist: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub min_slots: u32,
    pub appended: Vec<String>,
    pub skipped_links: usize,
}

/// Jump list of one application identity.
///
/// Construction trims both destination histories once; every later build is
/// an independent transaction against the same destination list.
pub struct JumpList<L: DestinationListService> {
    app_id: String,
    list: L,
    commands: TaskCommands,
    prune_outcomes: Vec<(HistoryClassification, PruneOutcome)>,
}

impl<L: DestinationListService> JumpList<L> {
    pub fn new(
        app_id: &str,
        mut list: L,
        history: &mut dyn DestinationHistoryService,
        pruner: &HistoryPruner,
        commands: TaskCommands,
        delete_now: bool,
    ) -> Self {
        let mut prune_outcomes = Vec::with_capacity(HistoryClassification::ALL.len());
        for classification in HistoryClassification::ALL {
            let outcome = pruner.prune(&mut *history, app_id, classification);
            prune_outcomes.push((classification, outcome));
        }

        if delete_now {
            match list.delete_list() {
                Ok(()) => info!("deleted jump list for {app_id}"),
                Err(error) => warn!("failed to delete jump list for {app_id}: {error}"),
            }
        }

        Self {
            app_id: app_id.to_string(),
            list,
            commands,
            prune_outcomes,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn prune_outcomes(&self) -> &[(HistoryClassification, PruneOutcome)] {
        &self.prune_outcomes
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut L {
        &mut self.list
    }

    pub fn into_list(self) -> L {
        self.list
    }

    /// Replaces the visible jump list in one transaction.
    ///
    /// Bookmarks are `label\npath\n` pairs and are filtered against the
    /// entries the user removed; the category is skipped when the text is
    /// empty.
    pub fn create_jump_list(
        &mut self,
        locator: &dyn HostLocator,
        options: &ListOptions,
        bookmarks: &str,
        playlists: &dyn PlaylistSource,
    ) -> Result<BuildReport, TransactionError> {
        let mut transaction = ListTransaction::begin(&mut self.list)?;
        let builder = CategoryBuilder::new(
            LinkFactory::new(locator),
            &options.icon_path,
            self.commands.clone(),
        );
        let mut skipped_links = 0;
        let mut population = Population {
            recent: options.recent,
            frequent: options.frequent,
            ..Population::default()
        };

        if options.bookmarks && !bookmarks.is_empty() {
            let built = builder.build_bookmark_links(bookmarks, transaction.removed());
            skipped_links += built.skipped;
            population.bookmarks = Some(NamedCategory {
                name: options.bookmark_category.clone(),
                links: built.links,
            });
        }

        if options.playlist {
            let built = builder.build_playlist_links(playlists);
            skipped_links += built.skipped;
            population.playlist = Some(NamedCategory {
                name: options.playlist_category.clone(),
                links: built.links,
            });
        }

        if options.tasks {
            let built = builder.build_task_links(&options.play_title, &options.open_title);
            skipped_links += built.skipped;
            population.tasks = Some(built.links);
        }

        transaction.populate(population);
        let report = BuildReport {
            min_slots: transaction.min_slots(),
            appended: transaction.appended().to_vec(),
            skipped_links,
        };
        transaction.commit()?;

        info!(
            "jump list committed for {}: categories={:?} skipped_links={}",
            self.app_id, report.appended, report.skipped_links
        );
        Ok(report)
    }
}
