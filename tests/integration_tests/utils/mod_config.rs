use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use feature_sweep::config::{self, CONFIG_ENV};

fn env_of(pairs: Vec<(&'static str, String)>) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<&'static str, String> = pairs.into_iter().collect();
    move |k| map.get(k).cloned()
}

#[test]
fn env_config_file_then_env_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("env.toml");
    fs::write(&p, "results = \"file.txt\"\nfaulty_delay_secs = 3\n").unwrap();
    let env = env_of(vec![
        (CONFIG_ENV, p.display().to_string()),
        ("FEATURE_SWEEP_DELAY_SECS", "11".into()),
    ]);
    let cfg = config::load(None, env).unwrap();
    assert_eq!(cfg.results, PathBuf::from("file.txt"));
    assert_eq!(cfg.faulty_delay_secs, 11);
}

#[test]
fn cli_config_beats_env_config() {
    let dir = tempfile::tempdir().unwrap();
    let cli_p = dir.path().join("cli.toml");
    let env_p = dir.path().join("env.toml");
    fs::write(&cli_p, "prefix = \"use \"\n").unwrap();
    fs::write(&env_p, "prefix = \"with \"\n").unwrap();
    let cfg = config::load(Some(cli_p.as_path()), env_of(vec![(CONFIG_ENV, env_p.display().to_string())])).unwrap();
    assert_eq!(cfg.prefix, "use ");
}

#[test]
fn malformed_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("broken.toml");
    fs::write(&p, "faulty_delay_secs = \"five\"\n").unwrap();
    let err = config::load(Some(p.as_path()), env_of(vec![])).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}
