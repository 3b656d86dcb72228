use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::destinations::DestinationHistoryService;
use crate::model::HistoryClassification;

/// Number of most recent destinations kept per classification.
pub const HISTORY_CAP: usize = 100;

const AUTOMATIC_DESTINATIONS_SUFFIX: &str = ".automaticDestinations-ms";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneOutcome {
    Pruned { removed: usize, failed: usize },
    FallbackDeleted(PathBuf),
    FallbackFailed { path: Option<PathBuf>, reason: String },
}

impl PruneOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FallbackFailed { .. })
    }
}

/// Trims the shell's destination history back to [`HISTORY_CAP`] entries.
#[derive(Debug, Clone)]
pub struct HistoryPruner {
    recent_dir: Option<PathBuf>,
    cache_id: Option<String>,
}

impl HistoryPruner {
    /// `recent_dir` is the user's shell `Recent` folder; `cache_id` overrides
    /// the cache file stem derived from the application identity.
    pub fn new(recent_dir: Option<PathBuf>, cache_id: Option<String>) -> Self {
        Self {
            recent_dir,
            cache_id,
        }
    }

    pub fn prune(
        &self,
        history: &mut dyn DestinationHistoryService,
        app_id: &str,
        classification: HistoryClassification,
    ) -> PruneOutcome {
        let records = match history.records(app_id, classification) {
            Ok(records) => records,
            Err(error) => {
                warn!(
                    "{} history unavailable for {app_id}: {error}; deleting cache file",
                    classification.label()
                );
                return self.delete_cache_file(app_id);
            }
        };

        let mut removed = 0;
        let mut failed = 0;
        for index in (HISTORY_CAP + 1..records.len()).rev() {
            match history.remove_record(app_id, &records[index]) {
                Ok(()) => removed += 1,
                Err(error) => {
                    warn!("failed to remove destination {}: {error}", records[index].path);
                    failed += 1;
                }
            }
        }

        if removed + failed > 0 {
            info!(
                "pruned {} history for {app_id}: removed={removed} failed={failed}",
                classification.label()
            );
        }
        PruneOutcome::Pruned { removed, failed }
    }

    pub fn cache_file_path(&self, app_id: &str) -> Option<PathBuf> {
        let stem = self
            .cache_id
            .clone()
            .unwrap_or_else(|| app_id_hash(app_id));
        self.recent_dir.as_ref().map(|dir| {
            dir.join("AutomaticDestinations")
                .join(format!("{stem}{AUTOMATIC_DESTINATIONS_SUFFIX}"))
        })
    }

    fn delete_cache_file(&self, app_id: &str) -> PruneOutcome {
        let Some(path) = self.cache_file_path(app_id) else {
            return PruneOutcome::FallbackFailed {
                path: None,
                reason: "shell recent folder is unknown".to_string(),
            };
        };

        match std::fs::remove_file(&path) {
            Ok(()) => PruneOutcome::FallbackDeleted(path),
            Err(error) => {
                warn!("failed to delete {}: {error}", path.display());
                PruneOutcome::FallbackFailed {
                    path: Some(path),
                    reason: error.to_string(),
                }
            }
        }
    }
}

/// The user's shell `Recent` folder under roaming application data.
pub fn shell_recent_dir(app_data: &Path) -> PathBuf {
    app_data.join("Microsoft").join("Windows").join("Recent")
}

/// Shell file id of an application identity: reflected CRC-64 with polynomial
/// `0x92C64265D32139A4`, all-ones seed and no final xor, over the upper-cased
/// UTF-16LE id.
pub fn app_id_hash(app_id: &str) -> String {
    const POLY: u64 = 0x92C6_4265_D321_39A4;

    let mut crc = u64::MAX;
    for unit in app_id.to_uppercase().encode_utf16() {
        for byte in unit.to_le_bytes() {
            crc ^= u64::from(byte);
            for _ in 0..8 {
                crc = if crc & 1 == 1 {
                    (crc >> 1) ^ POLY
                } else {
                    crc >> 1
                };
            }
        }
    }
    format!("{crc:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_id_hash_matches_shell_file_ids() {
        assert_eq!(app_id_hash("Winamp"), "879d567ffa1f5b9f");
        assert_eq!(app_id_hash("Microsoft.Windows.Explorer"), "f01b4d95cf55d32a");
    }

    #[test]
    fn app_id_hash_ignores_case() {
        assert_eq!(app_id_hash("winamp"), app_id_hash("WINAMP"));
    }

    #[test]
    fn cache_file_path_prefers_override() {
        let pruner = HistoryPruner::new(
            Some(PathBuf::from("recent")),
            Some("879d567ffa1f5b9f".to_string()),
        );
        let path = pruner.cache_file_path("Any.App").unwrap();
        assert_eq!(
            path,
            PathBuf::from("recent")
                .join("AutomaticDestinations")
                .join("879d567ffa1f5b9f.automaticDestinations-ms")
        );
    }

    #[test]
    fn cache_file_path_needs_recent_dir() {
        let pruner = HistoryPruner::new(None, None);
        assert!(pruner.cache_file_path("Any.App").is_none());
    }
}
