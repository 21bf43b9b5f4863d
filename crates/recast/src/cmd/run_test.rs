//! Tests for the run command

use super::*;
use std::io::Cursor;
use std::str::FromStr;

fn pipeline(toml: &str) -> Pipeline {
    Pipeline::initialize(&PipelineConfig::from_str(toml).unwrap()).unwrap()
}

fn run_lines(pipeline: &Pipeline, input: &str) -> (RunStats, Vec<serde_json::Value>) {
    let mut output = Vec::new();
    let stats = process_lines(pipeline, Cursor::new(input), &mut output).unwrap();
    let lines = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (stats, lines)
}

#[test]
fn test_emits_transformed_records() {
    let pipeline = pipeline(
        r#"
        [[steps]]
        type = "drop-fields"
        fields = ["password"]
        "#,
    );
    let input = r#"{"value": {"user": "jane", "password": "x"}}
{"value": {"user": "john"}, "topic": "users"}
"#;

    let (stats, lines) = run_lines(&pipeline, input);
    assert_eq!(
        stats,
        RunStats {
            read: 2,
            emitted: 2,
            dropped: 0,
            failed: 0
        }
    );
    assert_eq!(lines[0], serde_json::json!({"value": {"user": "jane"}}));
    assert_eq!(
        lines[1],
        serde_json::json!({"value": {"user": "john"}, "topic": "users"})
    );
}

#[test]
fn test_counts_drops_and_failures() {
    let pipeline = pipeline(
        r#"
        [[steps]]
        type = "compute"
        fields = [{ name = "value.half", expression = "value.n / value.d", type = "INT64" }]

        [[steps]]
        type = "drop"
        when = "value.half == 0"
        "#,
    );
    let input = r#"{"value": {"n": 8, "d": 2}}

not json
{"value": {"n": 1, "d": 0}}
{"value": {"n": 1, "d": 2}}
{"value": [1, 2]}
"#;

    let (stats, lines) = run_lines(&pipeline, input);
    assert_eq!(
        stats,
        RunStats {
            read: 5,
            emitted: 1,
            dropped: 1,
            failed: 3
        }
    );
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["value"]["half"], serde_json::json!(4));
}

#[test]
fn test_reads_input_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"key": "k1", "value": {{"a": 1}}}}"#).unwrap();

    let pipeline = pipeline("[[steps]]\ntype = \"unwrap-key-value\"\nunwrap-key = true");
    let reader = BufReader::new(File::open(file.path()).unwrap());
    let mut output = Vec::new();
    let stats = process_lines(&pipeline, reader, &mut output).unwrap();

    assert_eq!(stats.emitted, 1);
    assert_eq!(String::from_utf8(output).unwrap(), "{\"value\":\"k1\"}\n");
}
