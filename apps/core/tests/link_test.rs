use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use jumplist_core::link::{LinkError, LinkFactory};
use jumplist_core::model::PathMode;
use jumplist_core::platform::HostLocator;

struct FakeLocator {
    exe: Option<PathBuf>,
    shorts: HashMap<PathBuf, PathBuf>,
}

impl FakeLocator {
    fn new(exe: &str) -> Self {
        Self {
            exe: Some(PathBuf::from(exe)),
            shorts: HashMap::new(),
        }
    }

    fn with_short(mut self, long: &str, short: &str) -> Self {
        self.shorts.insert(PathBuf::from(long), PathBuf::from(short));
        self
    }
}

impl HostLocator for FakeLocator {
    fn current_executable_path(&self) -> io::Result<PathBuf> {
        self.exe
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "module path unavailable"))
    }

    fn short_form(&self, path: &Path) -> Option<PathBuf> {
        self.shorts.get(path).cloned()
    }
}

const ICON_PATH: &str = "C:\\Player\\Plugins\\gen_jumplist.dll";

#[test]
fn system_loader_mode_targets_fixed_utility() {
    let locator = FakeLocator::new("C:\\Player\\player.exe");
    let factory = LinkFactory::new(&locator);

    let link = factory
        .create_link(Path::new(ICON_PATH), "shell32.dll,Control_RunDLL", "Settings", 4, PathMode::SystemLoader)
        .unwrap();

    assert_eq!(link.target, PathBuf::from("rundll32.exe"));
    assert_eq!(link.arguments, "shell32.dll,Control_RunDLL");
    assert_eq!(link.icon.path, PathBuf::from(ICON_PATH));
    assert_eq!(link.icon.index, 4);
    assert_eq!(link.description, None);
}

#[test]
fn long_mode_forces_exe_extension() {
    let locator = FakeLocator::new("C:\\Program Files\\Player\\player.EXE.bak");
    let factory = LinkFactory::new(&locator);

    let link = factory
        .create_link(Path::new(ICON_PATH), "/COMMAND=40012", "Play", 0, PathMode::HostLong)
        .unwrap();

    assert_eq!(link.target, PathBuf::from("C:\\Program Files\\Player\\player.EXE.exe"));
    assert_eq!(link.title, "Play");
}

#[test]
fn short_mode_uses_short_form_of_host() {
    let locator = FakeLocator::new("C:\\Program Files\\Player\\player.exe")
        .with_short("C:\\Program Files\\Player\\player.exe", "C:\\PROGRA~1\\Player\\player.exe");
    let factory = LinkFactory::new(&locator);

    let link = factory
        .create_link(Path::new(ICON_PATH), "C:\\music\\a.mp3", "Song A", 2, PathMode::HostShort)
        .unwrap();

    assert_eq!(link.target, PathBuf::from("C:\\PROGRA~1\\Player\\player.exe"));
}

#[test]
fn short_mode_keeps_long_path_without_short_form() {
    let locator = FakeLocator::new("C:\\Player\\player.exe");
    let factory = LinkFactory::new(&locator);

    let link = factory
        .create_link(Path::new(ICON_PATH), "x", "X", 2, PathMode::HostShort)
        .unwrap();

    assert_eq!(link.target, PathBuf::from("C:\\Player\\player.exe"));
}

#[test]
fn rejects_missing_title() {
    let locator = FakeLocator::new("C:\\Player\\player.exe");
    let factory = LinkFactory::new(&locator);

    let result = factory.create_link(Path::new(ICON_PATH), "/COMMAND=40012", "  ", 0, PathMode::HostLong);

    assert!(matches!(result, Err(LinkError::MissingTitle)));
}

#[test]
fn surfaces_host_resolution_failure() {
    let locator = FakeLocator {
        exe: None,
        shorts: HashMap::new(),
    };
    let factory = LinkFactory::new(&locator);

    let result = factory.create_link(Path::new(ICON_PATH), "/COMMAND=40012", "Play", 0, PathMode::HostLong);

    match result {
        Err(LinkError::HostPath(error)) => assert_eq!(error.kind(), io::ErrorKind::NotFound),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn system_loader_mode_does_not_need_host_path() {
    let locator = FakeLocator {
        exe: None,
        shorts: HashMap::new(),
    };
    let factory = LinkFactory::new(&locator);

    let result = factory.create_link(Path::new(ICON_PATH), "", "Loader", 0, PathMode::SystemLoader);

    assert!(result.is_ok());
}

#[test]
fn rejects_overlong_host_path() {
    let long = format!("C:\\{}\\player.exe", "p".repeat(300));
    let locator = FakeLocator::new(&long);
    let factory = LinkFactory::new(&locator);

    let result = factory.create_link(Path::new(ICON_PATH), "", "Play", 0, PathMode::HostLong);

    assert!(matches!(result, Err(LinkError::PathTooLong(_))));
}

#[test]
fn rejects_overlong_and_nul_arguments() {
    let locator = FakeLocator::new("C:\\Player\\player.exe");
    let factory = LinkFactory::new(&locator);

    let long_args = "a".repeat(2_000);
    let too_long = factory.create_link(Path::new(ICON_PATH), &long_args, "Play", 0, PathMode::HostLong);
    assert!(matches!(too_long, Err(LinkError::ArgumentsTooLong)));

    let nul = factory.create_link(Path::new(ICON_PATH), "a\0b", "Play", 0, PathMode::HostLong);
    assert!(matches!(nul, Err(LinkError::InteriorNul { field: "arguments" })));
}
