use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::categories::{CategoryBuilder, TaskCommands};
use crate::link::LinkFactory;
use crate::model::{IconLocation, LaunchableReference, RemovedSnapshot};
use crate::platform::HostLocator;

struct FixedLocator;

impl HostLocator for FixedLocator {
    fn current_executable_path(&self) -> std::io::Result<PathBuf> {
        Ok(PathBuf::from("C:\\Player\\player.exe"))
    }

    fn short_form(&self, _path: &Path) -> Option<PathBuf> {
        None
    }
}

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn bookmark_build_p95_under_100ms() {
    let bookmarks: String = (0..2_000)
        .map(|i| format!("Track {i:04}\nC:\\music\\track_{i:04}.mp3\n"))
        .collect();
    let removed = RemovedSnapshot::new(
        (0..200)
            .map(|i| LaunchableReference {
                target: PathBuf::from("C:\\Player\\player.exe"),
                arguments: format!("C:\\music\\track_{:04}.mp3", i * 10),
                title: format!("Track {:04}", i * 10),
                icon: IconLocation {
                    path: PathBuf::from("C:\\Player\\gen_jumplist.dll"),
                    index: 2,
                },
                description: None,
            })
            .collect(),
    );

    let locator = FixedLocator;
    let builder = CategoryBuilder::new(
        LinkFactory::new(&locator),
        Path::new("C:\\Player\\gen_jumplist.dll"),
        TaskCommands::default(),
    );

    let warm = builder.build_bookmark_links(&bookmarks, &removed);
    assert_eq!(warm.links.len(), 1_800);

    let mut samples = Vec::with_capacity(40);
    for _ in 0..40 {
        let start = Instant::now();
        let _ = builder.build_bookmark_links(&bookmarks, &removed);
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
    }

    let p95 = p95_ms(&mut samples);
    assert!(p95 <= 100.0, "bookmark build p95 too high: {p95:.3}ms");
}
