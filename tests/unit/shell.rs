use super::*;
use serde_json::json;

#[test]
fn test_blank_line_is_none() {
    assert_eq!(ShellCommand::parse("   ").unwrap(), None);
}

#[test]
fn test_parse_simple_commands() {
    assert_eq!(
        ShellCommand::parse("activity search").unwrap(),
        Some(ShellCommand::Activity("search".to_string()))
    );
    assert_eq!(ShellCommand::parse("exit").unwrap(), Some(ShellCommand::Quit));
    assert_eq!(
        ShellCommand::parse("open /tmp/a.ts").unwrap(),
        Some(ShellCommand::Open(PathBuf::from("/tmp/a.ts")))
    );
}

#[test]
fn test_parse_create_with_and_without_parent() {
    assert_eq!(
        ShellCommand::parse("create RootFolder").unwrap(),
        Some(ShellCommand::Create {
            file_type: FileType::RootFolder,
            parent_id: None,
        })
    );
    assert_eq!(
        ShellCommand::parse("create File abc").unwrap(),
        Some(ShellCommand::Create {
            file_type: FileType::File,
            parent_id: Some("abc".to_string()),
        })
    );
    assert!(ShellCommand::parse("create Symlink").is_err());
}

#[test]
fn test_search_keeps_spaces_and_allows_empty() {
    assert_eq!(
        ShellCommand::parse("search foo bar").unwrap(),
        Some(ShellCommand::Search("foo bar".to_string()))
    );
    assert_eq!(
        ShellCommand::parse("search").unwrap(),
        Some(ShellCommand::Search(String::new()))
    );
}

#[test]
fn test_parse_config_json() {
    assert_eq!(
        ShellCommand::parse(r#"config {"workbench":{"sidebar":"right"}}"#).unwrap(),
        Some(ShellCommand::Config(json!({ "workbench": { "sidebar": "right" } })))
    );
    assert!(ShellCommand::parse("config {oops").is_err());
}

#[test]
fn test_missing_arguments_and_unknown_verbs() {
    assert!(ShellCommand::parse("menu").is_err());
    assert!(ShellCommand::parse("rename only-id").is_err());
    let err = ShellCommand::parse("frobnicate").unwrap_err();
    assert!(err.to_string().contains("frobnicate"));
}
