use std::path::{Path, PathBuf};

/// Utility the shell runs when a link has to go through an indirect loader.
pub const SYSTEM_LOADER: &str = "rundll32.exe";

/// Locates the host executable on disk.
pub trait HostLocator {
    fn current_executable_path(&self) -> std::io::Result<PathBuf>;

    /// Canonical 8.3 form of `path`, or `None` when the file system cannot provide one.
    fn short_form(&self, path: &Path) -> Option<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostLocator;

impl HostLocator for SystemHostLocator {
    fn current_executable_path(&self) -> std::io::Result<PathBuf> {
        std::env::current_exe()
    }

    fn short_form(&self, path: &Path) -> Option<PathBuf> {
        short_path_name(path)
    }
}

/// Host path with its extension forced to `.exe`.
pub fn host_executable(locator: &dyn HostLocator) -> std::io::Result<PathBuf> {
    let mut path = locator.current_executable_path()?;
    path.set_extension("exe");
    Ok(path)
}

/// Short form of `raw`, falling back to `raw` itself.
pub fn short_or_original(locator: &dyn HostLocator, raw: &str) -> String {
    locator
        .short_form(Path::new(raw))
        .map(|path| path.to_string_lossy().into_owned())
        .filter(|short| !short.is_empty())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(target_os = "windows")]
fn short_path_name(path: &Path) -> Option<PathBuf> {
    use std::ffi::OsString;
    use std::os::windows::ffi::{OsStrExt, OsStringExt};
    use windows_sys::Win32::Storage::FileSystem::GetShortPathNameW;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let required = unsafe { GetShortPathNameW(wide.as_ptr(), std::ptr::null_mut(), 0) };
    if required == 0 {
        return None;
    }

    let mut buffer = vec![0_u16; required as usize];
    let written = unsafe { GetShortPathNameW(wide.as_ptr(), buffer.as_mut_ptr(), required) };
    if written == 0 || written >= required {
        return None;
    }

    buffer.truncate(written as usize);
    Some(PathBuf::from(OsString::from_wide(&buffer)))
}

#[cfg(not(target_os = "windows"))]
fn short_path_name(_path: &Path) -> Option<PathBuf> {
    // No 8.3 aliases outside Windows.
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLocator;

    impl HostLocator for FixedLocator {
        fn current_executable_path(&self) -> std::io::Result<PathBuf> {
            Ok(PathBuf::from("C:/Program Files/Player/player.dll"))
        }

        fn short_form(&self, _path: &Path) -> Option<PathBuf> {
            None
        }
    }

    #[test]
    fn host_executable_forces_exe_extension() {
        let path = host_executable(&FixedLocator).unwrap();
        assert_eq!(path, PathBuf::from("C:/Program Files/Player/player.exe"));
    }

    #[test]
    fn short_or_original_falls_back_to_raw_input() {
        assert_eq!(
            short_or_original(&FixedLocator, "C:\\music\\a.mp3"),
            "C:\\music\\a.mp3"
        );
    }
}
