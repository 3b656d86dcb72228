use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{IconLocation, LaunchableReference, PathMode};
use crate::platform::{self, HostLocator, SYSTEM_LOADER};

/// Shell link paths are fixed-size buffers including the terminator.
pub const MAX_LINK_PATH: usize = 260;
/// Upper bound the shell accepts for link arguments.
pub const MAX_LINK_ARGUMENTS: usize = 1024;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("failed to resolve host executable: {0}")]
    HostPath(#[from] std::io::Error),
    #[error("link path exceeds {} characters: {}", MAX_LINK_PATH, .0.display())]
    PathTooLong(PathBuf),
    #[error("link arguments exceed {} characters", MAX_LINK_ARGUMENTS)]
    ArgumentsTooLong,
    #[error("{field} contains an interior NUL")]
    InteriorNul { field: &'static str },
    #[error("link title is required")]
    MissingTitle,
}

pub struct LinkFactory<'a> {
    locator: &'a dyn HostLocator,
}

impl<'a> LinkFactory<'a> {
    pub fn new(locator: &'a dyn HostLocator) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &'a dyn HostLocator {
        self.locator
    }

    /// Builds one launchable reference.
    ///
    /// `icon_path` names the file holding the icon resources and `icon_index`
    /// selects one of them. Nothing is returned unless every field, title
    /// included, was accepted.
    pub fn create_link(
        &self,
        icon_path: &Path,
        arguments: &str,
        title: &str,
        icon_index: u32,
        mode: PathMode,
    ) -> Result<LaunchableReference, LinkError> {
        let target = self.resolve_target(mode)?;
        check_path(&target)?;
        check_arguments(arguments)?;
        check_title(title)?;

        Ok(LaunchableReference {
            target,
            arguments: arguments.to_string(),
            title: title.to_string(),
            icon: IconLocation {
                path: icon_path.to_path_buf(),
                index: icon_index,
            },
            description: None,
        })
    }

    fn resolve_target(&self, mode: PathMode) -> Result<PathBuf, LinkError> {
        if mode == PathMode::SystemLoader {
            return Ok(PathBuf::from(SYSTEM_LOADER));
        }

        let host = platform::host_executable(self.locator)?;
        if mode == PathMode::HostShort {
            return Ok(self.locator.short_form(&host).unwrap_or(host));
        }
        Ok(host)
    }
}

fn check_path(target: &Path) -> Result<(), LinkError> {
    let raw = target.to_string_lossy();
    if raw.contains('\0') {
        return Err(LinkError::InteriorNul { field: "path" });
    }
    if raw.encode_utf16().count() >= MAX_LINK_PATH {
        return Err(LinkError::PathTooLong(target.to_path_buf()));
    }
    Ok(())
}

fn check_arguments(arguments: &str) -> Result<(), LinkError> {
    if arguments.contains('\0') {
        return Err(LinkError::InteriorNul { field: "arguments" });
    }
    if arguments.encode_utf16().count() >= MAX_LINK_ARGUMENTS {
        return Err(LinkError::ArgumentsTooLong);
    }
    Ok(())
}

fn check_title(title: &str) -> Result<(), LinkError> {
    if title.contains('\0') {
        return Err(LinkError::InteriorNul { field: "title" });
    }
    if title.trim().is_empty() {
        return Err(LinkError::MissingTitle);
    }
    Ok(())
}
