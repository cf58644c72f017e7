use ads2vsc_lib::report_lines;
use ads2vsc_migrate::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn create_source() -> Value {
    json!({
        "workbench.startupEditor": "welcomePage",
        "datasource.connectionGroups": [
            {"name": "ROOT", "id": "root-id"},
            {"name": "Dev", "id": "A", "parentId": "root-id"}
        ],
        "datasource.connections": [
            {
                "id": "c1",
                "groupId": "A",
                "providerName": "MSSQL",
                "options": {
                    "server": "srv1",
                    "database": "db1",
                    "encrypt": "True",
                    "trustServerCertificate": "false",
                    "connectionName": "MyConn"
                }
            },
            {"id": "c2", "groupId": "A"}
        ]
    })
}

fn create_target() -> Value {
    json!({
        "editor.fontSize": 14,
        "mssql.connectionGroups": [{"id": "X", "name": "Dev"}],
        "mssql.connections": []
    })
}

fn paths(dir: &TempDir, source: &Value, target: &Value) -> MigrationPaths {
    MigrationPaths {
        source: write_json(dir, "ads.json", source),
        target: write_json(dir, "settings.json", target),
    }
}

#[test]
fn test_migrate_files_writes_target() {
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir, &create_source(), &create_target());

    let result = ConnectionMigrator::default()
        .migrate_files(&paths, MigrationMode::Write)
        .unwrap();

    assert!(result.written);
    assert_eq!(result.report.migrated, 1);
    assert_eq!(result.report.skipped, 1);

    let written = read_json(&paths.target);
    assert_eq!(written["editor.fontSize"], 14);
    assert_eq!(written["mssql.connectionGroups"], json!([{"id": "X", "name": "Dev"}]));

    assert_eq!(
        written["mssql.connections"],
        json!([{
            "id": "c1",
            "server": "srv1",
            "database": "db1",
            "authenticationType": null,
            "user": null,
            "password": null,
            "profileName": "MyConn",
            "groupId": "X",
            "applicationName": "vscode-mssql",
            "encrypt": "Mandatory",
            "trustServerCertificate": false,
            "connectTimeout": 30,
            "commandTimeout": 30,
            "applicationIntent": "ReadWrite"
        }])
    );
}

#[test]
fn test_malformed_entry_does_not_block_good_one() {
    let dir = TempDir::new().unwrap();
    let mut source = create_source();
    source["datasource.connections"] = json!([
        {"id": "bad", "groupId": 12, "options": "oops"},
        {"id": "c1", "groupId": "A", "options": {"server": "srv1", "port": 1433}}
    ]);
    let paths = paths(&dir, &source, &create_target());

    let result = ConnectionMigrator::default()
        .migrate_files(&paths, MigrationMode::Write)
        .unwrap();

    assert!(result.written);
    assert_eq!(result.report.migrated, 1);
    assert_eq!(result.report.skipped, 1);
    let skipped = &result.report.skipped_connections[0];
    assert_eq!(skipped.id.as_deref(), Some("bad"));
    assert!(matches!(skipped.reason, SkipReason::InvalidConnection(_)));

    let written = read_json(&paths.target);
    let conns = written["mssql.connections"].as_array().unwrap();
    assert_eq!(conns.len(), 1);
    assert_eq!(conns[0]["id"], "c1");
    assert_eq!(conns[0]["groupId"], "X");

    let lines = report_lines(&result.report, &paths.target, result.written);
    assert!(lines[0].starts_with("Skipping connection bad: invalid connection entry:"));
}

#[test]
fn test_written_file_uses_four_space_indent() {
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir, &create_source(), &create_target());

    ConnectionMigrator::default()
        .migrate_files(&paths, MigrationMode::Write)
        .unwrap();

    let text = fs::read_to_string(&paths.target).unwrap();
    assert!(text.starts_with("{\n    \"editor.fontSize\": 14,\n"));
    assert!(text.contains("\n        {\n            \"id\": \"c1\","));
}

#[test]
fn test_rerun_adds_nothing() {
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir, &create_source(), &create_target());
    let migrator = ConnectionMigrator::default();

    migrator.migrate_files(&paths, MigrationMode::Write).unwrap();
    let after_first = fs::read_to_string(&paths.target).unwrap();

    let second = migrator.migrate_files(&paths, MigrationMode::Write).unwrap();
    assert_eq!(second.report.migrated, 0);
    assert_eq!(second.report.skipped, 2);
    assert_eq!(fs::read_to_string(&paths.target).unwrap(), after_first);
}

#[test]
fn test_dry_run_leaves_target_untouched() {
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir, &create_source(), &create_target());
    let before = fs::read_to_string(&paths.target).unwrap();

    let result = ConnectionMigrator::default()
        .migrate_files(&paths, MigrationMode::DryRun)
        .unwrap();

    assert!(!result.written);
    assert_eq!(result.report.migrated, 1);
    assert_eq!(fs::read_to_string(&paths.target).unwrap(), before);

    let rendered: Value = serde_json::from_slice(&result.output).unwrap();
    assert_eq!(rendered["mssql.connections"][0]["id"], "c1");
}

#[test]
fn test_missing_source_file() {
    let dir = TempDir::new().unwrap();
    let target = write_json(&dir, "settings.json", &create_target());
    let paths =
        MigrationPaths { source: dir.path().join("nope.json"), target: target.clone() };
    let before = fs::read_to_string(&target).unwrap();

    let err = ConnectionMigrator::default()
        .migrate_files(&paths, MigrationMode::Write)
        .unwrap_err();

    assert_eq!(err.kind(), MigrateErrorKind::MissingFile);
    assert_eq!(err.role(), Some(DocumentRole::Source));
    assert_eq!(fs::read_to_string(&target).unwrap(), before);
}

#[test]
fn test_missing_target_file() {
    let dir = TempDir::new().unwrap();
    let source = write_json(&dir, "ads.json", &create_source());
    let paths = MigrationPaths { source, target: dir.path().join("settings.json") };

    let err = ConnectionMigrator::default()
        .migrate_files(&paths, MigrationMode::Write)
        .unwrap_err();

    assert_eq!(err.kind(), MigrateErrorKind::MissingFile);
    assert_eq!(err.role(), Some(DocumentRole::Target));
    assert!(!paths.target.exists());
}

#[test]
fn test_malformed_target_is_not_rewritten() {
    let dir = TempDir::new().unwrap();
    let source = write_json(&dir, "ads.json", &create_source());
    let target = dir.path().join("settings.json");
    let broken = "{\n    // comments are not JSON\n    \"editor.fontSize\": 14\n}";
    fs::write(&target, broken).unwrap();

    let paths = MigrationPaths { source, target: target.clone() };

    let err = ConnectionMigrator::default()
        .migrate_files(&paths, MigrationMode::Write)
        .unwrap_err();

    assert_eq!(err.kind(), MigrateErrorKind::MalformedDocument);
    assert!(err.is_load_failure());
    assert_eq!(fs::read_to_string(&target).unwrap(), broken);
}

#[test]
fn test_bad_group_list_aborts_before_migration() {
    let dir = TempDir::new().unwrap();
    let mut source = create_source();
    source["datasource.connectionGroups"] = json!([{"id": "A"}]);
    let paths = paths(&dir, &source, &create_target());
    let before = fs::read_to_string(&paths.target).unwrap();

    let err = ConnectionMigrator::default()
        .migrate_files(&paths, MigrationMode::Write)
        .unwrap_err();

    assert_eq!(err.kind(), MigrateErrorKind::GroupProcessing);
    assert_eq!(fs::read_to_string(&paths.target).unwrap(), before);
}

#[test]
fn test_target_without_groups_or_connections_key() {
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir, &create_source(), &json!({"editor.fontSize": 14}));

    let result = ConnectionMigrator::default()
        .migrate_files(&paths, MigrationMode::Write)
        .unwrap();

    assert_eq!(result.report.warnings, vec![MigrationWarning::NoTargetGroups]);
    let written = read_json(&paths.target);
    let conns = written["mssql.connections"].as_array().unwrap();
    assert_eq!(conns.len(), 1);
    assert!(conns[0].get("groupId").is_none());
}

#[test]
fn test_report_lines_after_run() {
    let dir = TempDir::new().unwrap();
    let paths = paths(&dir, &create_source(), &create_target());

    let result = ConnectionMigrator::default()
        .migrate_files(&paths, MigrationMode::Write)
        .unwrap();
    let lines = report_lines(&result.report, &paths.target, result.written);

    assert_eq!(lines[0], "Skipping connection c2: No 'options' field found.");
    assert!(lines.contains(&"Successfully migrated 1 new connection(s).".to_string()));
    assert!(lines.contains(&"Skipped 1 connection(s).".to_string()));
}
