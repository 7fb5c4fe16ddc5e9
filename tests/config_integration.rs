use std::path::PathBuf;
use std::time::Duration;

use ctek::config::{
    ConfigFlags, EditorOptions, load_config_flags, parse_flag_tokens, save_config_flags,
};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".ctekrc");
    let content = r"
# comment
--tab-stop 4

--perf
   
--log-file=ctek.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.tab_stop, Some(4));
    assert!(flags.perf);
    assert_eq!(flags.log_file, Some(PathBuf::from("ctek.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".ctekrc");
    std::fs::write(&path, "--tab-stop 2\n--quit-times 1\n--log-file file.log\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "ctek".to_string(),
        "--tab-stop".to_string(),
        "4".to_string(),
        "--message-timeout".to_string(),
        "9".to_string(),
        "main.c".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert_eq!(effective.tab_stop, Some(4), "cli should override tab stop");
    assert_eq!(effective.quit_times, Some(1), "file flags should remain");
    assert_eq!(effective.message_timeout, Some(9));
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_saved_flags_feed_editor_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ctek").join("config");
    let cli_flags = parse_flag_tokens(&[
        "ctek".to_string(),
        "--quit-times=0".to_string(),
        "--message-timeout=1".to_string(),
    ]);
    save_config_flags(&path, &cli_flags).unwrap();

    let loaded = load_config_flags(&path).unwrap();
    assert_eq!(loaded, cli_flags);

    let options = EditorOptions::from_flags(&loaded);
    assert_eq!(options.quit_times, 0);
    assert_eq!(options.message_timeout, Duration::from_secs(1));
    assert_eq!(options.tab_stop, EditorOptions::default().tab_stop);
}

#[test]
fn test_config_union_merges_perf() {
    let file = ConfigFlags {
        perf: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&ConfigFlags::default());
    assert!(merged.perf);
}
