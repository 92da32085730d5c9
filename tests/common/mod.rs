#![allow(dead_code)]

use std::path::{Path, PathBuf};

use eely::config::{ConfigFile, ConfigOverrides, ResolvedPaths, config_dir, load_and_validate};

pub use eely_test_utils::{init_tracing, with_timeout};

/// The sample course, writing into `output`.
pub fn fixture_course(output: &Path) -> (ConfigFile, ResolvedPaths) {
    let config_path = eely_test_utils::fixture_course();
    let mut cfg = load_and_validate(&config_path).expect("fixture config is valid");
    cfg.apply_overrides(&ConfigOverrides {
        output: Some(output.to_path_buf()),
        ..ConfigOverrides::default()
    })
    .expect("output override applies");

    let dir = config_dir(&config_path).expect("fixture directory exists");
    let paths = ResolvedPaths::resolve(&cfg, &dir);
    (cfg, paths)
}

/// Canonical directory of the sample course.
pub fn fixture_dir() -> PathBuf {
    std::fs::canonicalize(eely_test_utils::fixture_course())
        .expect("fixture config exists")
        .parent()
        .expect("fixture config has a parent")
        .to_path_buf()
}
