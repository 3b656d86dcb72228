use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::link::{LinkError, LinkFactory};
use crate::model::{LaunchableReference, OrderedCollection, PathMode, RemovedSnapshot};
use crate::platform;

pub const BOOKMARK_ICON_INDEX: u32 = 2;
pub const PLAYLIST_ICON_INDEX: u32 = 3;
pub const PLAY_ICON_INDEX: u32 = 0;
pub const OPEN_ICON_INDEX: u32 = 1;

pub const DEFAULT_PLAY_COMMAND: &str = "/COMMAND=40012";
pub const DEFAULT_OPEN_COMMAND: &str = "/COMMAND=40029";

/// Read-only view over the host's playlists.
pub trait PlaylistSource {
    fn count(&self) -> usize;
    fn name(&self, index: usize) -> String;
    fn filename(&self, index: usize) -> String;
    fn item_count(&self, index: usize) -> usize;
}

/// Opaque command tokens the host understands for its two built-in tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCommands {
    pub play: String,
    pub open: String,
}

impl Default for TaskCommands {
    fn default() -> Self {
        Self {
            play: DEFAULT_PLAY_COMMAND.to_string(),
            open: DEFAULT_OPEN_COMMAND.to_string(),
        }
    }
}

/// Links produced for one category, plus the number of entries that failed to build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryLinks {
    pub links: OrderedCollection,
    pub skipped: usize,
}

impl CategoryLinks {
    fn push_or_skip(
        &mut self,
        label: &str,
        built: Result<LaunchableReference, LinkError>,
        description: Option<&str>,
    ) {
        match built {
            Ok(link) => match description {
                Some(description) => self.links.push(link.with_description(description)),
                None => self.links.push(link),
            },
            Err(error) => {
                warn!("jump list entry '{label}' skipped: {error}");
                self.skipped += 1;
            }
        }
    }
}

pub struct CategoryBuilder<'a> {
    factory: LinkFactory<'a>,
    icon_path: PathBuf,
    commands: TaskCommands,
}

impl<'a> CategoryBuilder<'a> {
    pub fn new(factory: LinkFactory<'a>, icon_path: &Path, commands: TaskCommands) -> Self {
        Self {
            factory,
            icon_path: icon_path.to_path_buf(),
            commands,
        }
    }

    /// Builds links from `label\npath\n` pairs, leaving out anything the user removed.
    ///
    /// A trailing label without a path is dropped.
    pub fn build_bookmark_links(
        &self,
        bookmarks: &str,
        removed: &RemovedSnapshot,
    ) -> CategoryLinks {
        let mut category = CategoryLinks::default();
        let mut lines = bookmarks.lines();

        while let (Some(label), Some(raw_path)) = (lines.next(), lines.next()) {
            let resolved = platform::short_or_original(self.factory.locator(), raw_path);
            if removed.contains_arguments(&resolved) {
                continue;
            }

            let built = self.factory.create_link(
                &self.icon_path,
                &resolved,
                label,
                BOOKMARK_ICON_INDEX,
                PathMode::HostShort,
            );
            category.push_or_skip(label, built, Some(&resolved));
        }

        category
    }

    /// One link per playlist, titled `name [items]`.
    pub fn build_playlist_links(&self, source: &dyn PlaylistSource) -> CategoryLinks {
        let mut category = CategoryLinks::default();

        for index in 0..source.count() {
            let filename = source.filename(index);
            let title = format!("{} [{}]", source.name(index), source.item_count(index));
            let built = self.factory.create_link(
                &self.icon_path,
                &filename,
                &title,
                PLAYLIST_ICON_INDEX,
                PathMode::HostShort,
            );
            category.push_or_skip(&title, built, Some(&filename));
        }

        category
    }

    /// The two built-in tasks, play then open, both targeting the host directly.
    pub fn build_task_links(&self, play_title: &str, open_title: &str) -> CategoryLinks {
        let mut category = CategoryLinks::default();

        let play = self.factory.create_link(
            &self.icon_path,
            &self.commands.play,
            play_title,
            PLAY_ICON_INDEX,
            PathMode::HostLong,
        );
        category.push_or_skip(play_title, play, None);

        let open = self.factory.create_link(
            &self.icon_path,
            &self.commands.open,
            open_title,
            OPEN_ICON_INDEX,
            PathMode::HostLong,
        );
        category.push_or_skip(open_title, open, None);

        category
    }
}
