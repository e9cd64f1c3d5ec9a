use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use glimpse_dump::{DumpValue, DumpWriter, Field, IdentitySource, LogPathConfig};
use tempfile::TempDir;

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

fn nested_value() -> DumpValue {
    DumpValue::Array(vec![
        ("plain".to_string(), DumpValue::from("x")),
        (
            "nested".to_string(),
            DumpValue::list(vec![DumpValue::from(1), DumpValue::from(2)]),
        ),
    ])
}

#[test]
fn test_plain_mode_single_timestamped_line() {
    let dir = TempDir::new().unwrap();
    DumpWriter::new("hello")
        .plain()
        .filename("plain.log")
        .log_dir(dir.path())
        .write();

    let content = read(&dir, "plain.log");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(" hello"));
    // "YYYY-MM-DD HH:MM:SS hello"
    assert_eq!(lines[0].len(), "1970-01-01 00:00:00 hello".len());
    assert!(!content.contains('<'));
}

#[test]
fn test_plain_mode_without_timestamp() {
    let dir = TempDir::new().unwrap();
    DumpWriter::new("hello")
        .plain()
        .timestamped(false)
        .filename("plain.log")
        .log_dir(dir.path())
        .write();

    assert_eq!(read(&dir, "plain.log"), "hello\n");
}

#[test]
fn test_plain_mode_appends() {
    let dir = TempDir::new().unwrap();
    for message in ["one", "two"] {
        DumpWriter::new(message)
            .plain()
            .timestamped(false)
            .filename("plain.log")
            .log_dir(dir.path())
            .write();
    }
    assert_eq!(read(&dir, "plain.log"), "one\ntwo\n");
}

#[test]
fn test_rich_dump_header_written_once() {
    let dir = TempDir::new().unwrap();
    for message in ["first", "second"] {
        DumpWriter::new(message)
            .filename("dump.html")
            .log_dir(dir.path())
            .write();
    }

    let content = read(&dir, "dump.html");
    assert_eq!(content.matches("<script>function toggleDiv").count(), 1);
    assert_eq!(content.matches("border-top:1px #000 solid").count(), 1);
    assert_eq!(content.matches("<b>Logged on:</b>").count(), 2);
    // The divider precedes the second dump's <pre> block.
    let divider_at = content.find("border-top").unwrap();
    let second_at = content.find("<b>Message:</b> second").unwrap();
    assert!(divider_at < second_at);
}

#[test]
fn test_header_reemitted_when_marker_absent() {
    let dir = TempDir::new().unwrap();
    // Existing file without the "Logged on:" marker: not a dump file, so
    // the header goes in again and numbering restarts.
    fs::write(dir.path().join("dump.html"), "<html>stale content</html>\n").unwrap();

    DumpWriter::new("recovered")
        .value(nested_value())
        .filename("dump.html")
        .log_dir(dir.path())
        .write();

    let content = read(&dir, "dump.html");
    assert!(content.starts_with("<html>stale content</html>\n"));
    assert_eq!(content.matches("<script>function toggleDiv").count(), 1);
    assert!(!content.contains("border-top:1px #000 solid"));
    assert!(content.contains("javascript: toggleDiv(1)"));
}

#[test]
fn test_toggle_numbering_continues_across_writers() {
    let dir = TempDir::new().unwrap();
    for _ in 0..3 {
        DumpWriter::new("snapshot")
            .value(nested_value())
            .filename("dump.html")
            .log_dir(dir.path())
            .write();
    }

    let content = read(&dir, "dump.html");
    // One nested group per dump: ids 1, 2, 3 with no collisions.
    for id in 1..=3 {
        assert_eq!(
            content
                .matches(&format!("javascript: toggleDiv({})", id))
                .count(),
            1
        );
        assert_eq!(
            content
                .matches(&format!("<span id=d{} style=\"display:none\">", id))
                .count(),
            1
        );
    }
    assert!(!content.contains("toggleDiv(4)"));
}

#[test]
fn test_toggle_numbering_resumes_from_seeded_file() {
    let dir = TempDir::new().unwrap();
    // A file left behind by an earlier writer: header marker plus three
    // existing toggle anchors.
    let seeded = format!(
        "<b>Logged on:</b> old dump\n{}{}{}",
        "<a id=a1 href=\"javascript: toggleDiv(1)\">+</a>\n",
        "<a id=a2 href=\"javascript: toggleDiv(2)\">+</a>\n",
        "<a id=a3 href=\"javascript: toggleDiv(3)\">+</a>\n"
    );
    fs::write(dir.path().join("dump.html"), seeded).unwrap();

    DumpWriter::new("appended")
        .value(nested_value())
        .filename("dump.html")
        .log_dir(dir.path())
        .write();

    let content = read(&dir, "dump.html");
    assert!(content.contains("javascript: toggleDiv(4)"));
    assert_eq!(content.matches("javascript: toggleDiv(1)").count(), 1);
}

#[test]
fn test_bool_false_renders_literally() {
    let dir = TempDir::new().unwrap();
    DumpWriter::new("flag state")
        .value(false)
        .filename("dump.html")
        .log_dir(dir.path())
        .write();

    let content = read(&dir, "dump.html");
    assert!(content.contains("<b>Content (Type: <i>bool</i>):</b> false"));
}

#[test]
fn test_call_site_recorded_in_dump() {
    let dir = TempDir::new().unwrap();
    DumpWriter::new("where am I")
        .filename("dump.html")
        .log_dir(dir.path())
        .write();

    let content = read(&dir, "dump.html");
    assert!(content.contains("<b>Debug called in file:</b>"));
    assert!(content.contains("dump_tests.rs"));
}

#[test]
fn test_object_dump_colorized() {
    let dir = TempDir::new().unwrap();
    let value = DumpValue::object(
        "Session",
        vec![
            Field::public("entries", DumpValue::list(vec![DumpValue::from(1)])),
            Field::protected("token", "abc"),
        ],
    );
    DumpWriter::new("session state")
        .value(value)
        .criticality("high")
        .filename("dump.html")
        .log_dir(dir.path())
        .write();

    let content = read(&dir, "dump.html");
    assert!(content.contains("Content (Type: <i>object</i> (of type: <i>Session</i>)):"));
    assert!(content.contains("<b>Criticality:</b> high"));
    assert!(content.contains(":<span class=\"pro\">protected</span>"));
    assert!(content.contains("[<span class=\"ind\">0</span>]"));
    assert!(content.contains("<span class=\"ass\">=&gt;</span>"));
}

struct FixedConfig(PathBuf);

impl LogPathConfig for FixedConfig {
    fn log_path(&self) -> PathBuf {
        self.0.clone()
    }
}

#[test]
fn test_config_collaborator_picks_log_dir() {
    let dir = TempDir::new().unwrap();
    let config = FixedConfig(dir.path().join("diagnostics"));

    DumpWriter::new("routed")
        .config(&config)
        .filename("dump.html")
        .write();

    let content = fs::read_to_string(dir.path().join("diagnostics/dump.html")).unwrap();
    assert!(content.contains("<b>Message:</b> routed"));
}

struct FixedIdentity(Option<String>);

impl IdentitySource for FixedIdentity {
    fn current_user_id(&self) -> Option<String> {
        self.0.clone()
    }
}

#[test]
fn test_identity_annotates_rich_dumps() {
    let dir = TempDir::new().unwrap();
    DumpWriter::new("audited")
        .identity(Arc::new(FixedIdentity(Some("jdoe".to_string()))))
        .filename("dump.html")
        .log_dir(dir.path())
        .write();

    assert!(read(&dir, "dump.html").contains("<b>by:</b> <i>jdoe</i>"));
}

#[test]
fn test_missing_identity_omits_annotation() {
    let dir = TempDir::new().unwrap();
    DumpWriter::new("anonymous")
        .identity(Arc::new(FixedIdentity(None)))
        .filename("dump.html")
        .log_dir(dir.path())
        .write();

    assert!(!read(&dir, "dump.html").contains("<b>by:</b>"));
}

#[test]
fn test_unwritable_target_never_fails_caller() {
    // Point the log directory at a path whose parent is a regular file;
    // creating it must fail, and write() must swallow that.
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    DumpWriter::new("lost dump")
        .filename("dump.html")
        .log_dir(blocker.join("logs"))
        .write();
}

#[test]
fn test_default_filename_gets_timestamp_prefix() {
    let dir = TempDir::new().unwrap();
    DumpWriter::new("default target")
        .log_dir(dir.path())
        .write();

    let entries: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].ends_with("_debug.html"));
    // 14-digit YmdHis prefix.
    let prefix = entries[0].trim_end_matches("_debug.html");
    assert_eq!(prefix.len(), 14);
    assert!(prefix.chars().all(|c| c.is_ascii_digit()));
}
