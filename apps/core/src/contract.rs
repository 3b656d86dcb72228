use serde::{Deserialize, Serialize};

use crate::categories::PlaylistSource;
use crate::jump_list::{BuildReport, ListOptions};

/// Playlist as the host reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub name: String,
    pub filename: String,
    pub item_count: usize,
}

impl PlaylistSource for Vec<PlaylistEntry> {
    fn count(&self) -> usize {
        self.len()
    }

    fn name(&self, index: usize) -> String {
        self[index].name.clone()
    }

    fn filename(&self, index: usize) -> String {
        self[index].filename.clone()
    }

    fn item_count(&self, index: usize) -> usize {
        self[index].item_count
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildRequest {
    #[serde(default)]
    pub options: Option<ListOptions>,
    #[serde(default)]
    pub bookmarks: String,
    #[serde(default)]
    pub playlists: Vec<PlaylistEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildResponse {
    pub report: BuildReport,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub deleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreRequest {
    Build(BuildRequest),
    Delete,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreResponse {
    Build(BuildResponse),
    Delete(DeleteResponse),
}
