use std::fs;
use std::path::Path;

use clap::Parser;
use discfit::error::ApiError;
use discfit::tooling::cli::{Cli, CliContext};
use tempfile::TempDir;

fn write_file(path: &Path, len: usize) {
    fs::write(path, vec![b'x'; len]).unwrap();
}

/// Media tree plus a config file that keeps the run independent of the cwd.
fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    let media = temp.path().join("media");
    fs::create_dir_all(media.join("nested")).unwrap();
    write_file(&media.join("a.bin"), 90);
    write_file(&media.join("b.bin"), 90);
    write_file(&media.join("c.bin"), 90);
    write_file(&media.join("nested").join("d.bin"), 30);
    fs::write(
        temp.path().join("discfit.toml"),
        "target_size = 240\n[sorter]\ngranularity = 100\n",
    )
    .unwrap();
    temp
}

fn context(temp: &TempDir, extra: &[&str]) -> CliContext {
    let media = temp.path().join("media");
    let config = temp.path().join("discfit.toml");
    let mut args = vec![
        "discfit".to_string(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
        "--path".to_string(),
        media.to_string_lossy().into_owned(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    let cli = Cli::try_parse_from(args).unwrap();
    CliContext::new(&cli).unwrap()
}

#[test]
fn json_summary_reports_sets_for_top_level_files() {
    let temp = fixture();
    let output = context(&temp, &["--format", "json"]).execute().unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["set_count"].as_u64(), Some(2));
    assert_eq!(parsed["sets"][0]["size"].as_i64(), Some(180));
    assert_eq!(parsed["sets"][1]["size"].as_i64(), Some(90));
    assert_eq!(parsed["pending"]["count"].as_u64(), Some(0));
    assert_eq!(parsed["stop_reason"].as_str(), Some("drained"));
}

#[test]
fn recursive_flag_includes_nested_files() {
    let temp = fixture();
    let output = context(&temp, &["--r", "--format", "json"])
        .execute()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let placed: u64 = parsed["sets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["item_count"].as_u64().unwrap())
        .sum();
    assert_eq!(placed, 4);
}

#[test]
fn sets_flag_stops_early() {
    let temp = fixture();
    let output = context(&temp, &["--sets", "1", "--format", "json"])
        .execute()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["set_count"].as_u64(), Some(1));
    assert_eq!(parsed["pending"]["count"].as_u64(), Some(1));
    assert_eq!(parsed["stop_reason"].as_str(), Some("set_limit"));
}

#[test]
fn text_summary_lists_files() {
    let temp = fixture();
    let output = context(&temp, &[]).execute().unwrap();
    assert!(output.contains("File sets (2)"));
    assert!(output.contains("a.bin"));
    assert!(output.contains("Total: 2 sets, 3 files placed"));
}

#[test]
fn cli_flags_override_config_file() {
    let temp = fixture();
    let ctx = context(&temp, &["--target-size", "1000"]);
    assert_eq!(ctx.config().target_size, 1000);
    assert_eq!(ctx.config().sorter.granularity, 100);
}

#[test]
fn print_config_emits_toml() {
    let temp = fixture();
    let output = context(&temp, &["--print-config"]).execute().unwrap();
    let parsed: toml::Value = toml::from_str(&output).unwrap();
    assert_eq!(parsed["target_size"].as_integer(), Some(240));
}

#[test]
fn missing_paths_fail_with_no_path_resolved() {
    let temp = fixture();
    let config = temp.path().join("discfit.toml");
    let cli = Cli::try_parse_from([
        "discfit".to_string(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
        "--path".to_string(),
        temp.path().join("missing").to_string_lossy().into_owned(),
    ])
    .unwrap();

    let err = CliContext::new(&cli).unwrap().execute().unwrap_err();
    assert!(matches!(err, ApiError::NoPathResolved(_)));
}

#[test]
fn zero_target_size_is_a_config_error() {
    let temp = fixture();
    let config = temp.path().join("discfit.toml");
    let cli = Cli::try_parse_from([
        "discfit".to_string(),
        "--config".to_string(),
        config.to_string_lossy().into_owned(),
        "--target-size".to_string(),
        "0".to_string(),
    ])
    .unwrap();

    assert!(matches!(
        CliContext::new(&cli),
        Err(ApiError::ConfigError(_))
    ));
}
