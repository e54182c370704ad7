use reqwalker::config::{
    create_default_config, load_config_with_env_prefix, parse_config_file, CliArgs, ConfigBuilder, FileConfig,
};
use reqwalker::error::ReqwalkerError;
use reqwalker::models::{OutputFormat, PartialSettings};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_cli_overrides_config_file() {
    let project = tempdir().unwrap();
    let config_dir = tempdir().unwrap();
    let config_path = config_dir.path().join("reqwalker.toml");

    fs::write(
        &config_path,
        format!(
            "scan_path = {:?}\noutput_format = \"json\"\noffline = true\njobs = 3\nexclude_patterns = [\"build\"]\n",
            project.path().display().to_string()
        ),
    )
    .unwrap();

    let cli_args = CliArgs {
        config: Some(config_path),
        output_format: Some(OutputFormat::Csv),
        jobs: Some(1),
        ..Default::default()
    };

    let settings = load_config_with_env_prefix(cli_args, "RQW_IT_CLI_OVERRIDE").unwrap();

    assert_eq!(settings.scan_path, project.path());
    assert_eq!(settings.output_format, OutputFormat::Csv);
    assert_eq!(settings.jobs, 1);
    assert!(settings.offline);
    assert_eq!(settings.exclude_patterns, vec!["build".to_string()]);
}

#[test]
fn test_invalid_config_file_is_critical() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("reqwalker.toml");
    fs::write(&config_path, "timeout_secs = \"soon\"\n").unwrap();

    let cli_args = CliArgs {
        config: Some(config_path),
        ..Default::default()
    };

    let err = load_config_with_env_prefix(cli_args, "RQW_IT_INVALID").unwrap_err();
    assert!(matches!(err, ReqwalkerError::ConfigParse { .. }));
    assert!(err.is_critical());
}

#[test]
fn test_nonexistent_scan_path_rejected() {
    let cli_args = CliArgs {
        path: Some(PathBuf::from("/no/such/project/dir")),
        ..Default::default()
    };

    let err = ConfigBuilder::new()
        .load_from(&reqwalker::config::CliConfig::new(cli_args))
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, ReqwalkerError::InvalidPath { .. }));
}

#[test]
fn test_default_template_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf").join(".reqwalker.toml");

    create_default_config(&path).unwrap();
    let partial = parse_config_file(&path).unwrap();

    // Everything is commented out, so the template changes nothing
    assert_eq!(partial, PartialSettings::default());
    assert!(FileConfig::with_path(&path).path().ends_with(".reqwalker.toml"));
}
