//! End-to-end tests for the analyze command using files on disk.

use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use trace_execstats::analyzer::ContentionSource;
use trace_execstats::commands::{execute_analyze, validate_args, AnalyzeArgs};
use trace_execstats::output::read_report;
use trace_execstats::plan::NodeId;

fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn plan_json() -> serde_json::Value {
    json!({
        "1": {
            "flow_id": "f-1",
            "processors": [{
                "processor_id": 1,
                "outputs": [{
                    "streams": [{ "type": "remote", "stream_id": 1, "target_node_id": 2 }]
                }]
            }]
        },
        "2": {
            "flow_id": "f-1",
            "processors": [{ "processor_id": 2 }]
        }
    })
}

fn trace_json() -> serde_json::Value {
    json!({
        "spans": [
            {
                "span_id": 1,
                "operation": "table reader",
                "structured": [{
                    "component": { "type": "processor", "id": 1 },
                    "stats": {
                        "kv": { "bytes_read": 100, "kv_time": { "secs": 0, "nanos": 2000000 } }
                    }
                }]
            },
            {
                "span_id": 2,
                "operation": "outbox",
                "structured": [{
                    "component": { "type": "stream", "id": 1 },
                    "stats": { "net_tx": { "bytes_sent": 40, "messages_sent": 4 } }
                }]
            },
            {
                "span_id": 3,
                "operation": "flow",
                "structured": [{
                    "component": { "type": "flow", "flow_id": "f-1", "node_id": 2 },
                    "stats": { "flow": { "max_mem_usage": 4096 } }
                }]
            }
        ]
    })
}

fn setup() -> (TempDir, AnalyzeArgs) {
    let dir = tempfile::tempdir().unwrap();
    let plan = write_json(dir.path(), "plan.json", &plan_json());
    let trace = write_json(dir.path(), "trace.json", &trace_json());

    let args = AnalyzeArgs {
        plan_paths: vec![plan],
        trace_path: trace,
        output_json: Some(dir.path().join("out/report.json")),
        ..Default::default()
    };
    (dir, args)
}

#[test]
fn test_analyze_writes_report() {
    let (_dir, args) = setup();
    let output = args.output_json.clone().unwrap();

    validate_args(&args).unwrap();
    let report = execute_analyze(args).unwrap();

    assert_eq!(report.query.kv_bytes_read, 100);
    assert_eq!(report.query.network_bytes_sent, 40);
    assert_eq!(report.query.network_messages, 4);
    assert_eq!(report.query.max_mem_usage, 4096);
    assert_eq!(report.source_topology, Some(0));
    assert!(!report.has_errors());

    let loaded = read_report(&output).unwrap();
    assert_eq!(loaded, report);
    assert_eq!(loaded.nodes.max_mem_usage.get(&NodeId(2)), Some(&4096));
}

#[test]
fn test_analyze_legacy_contention() {
    let (_dir, mut args) = setup();
    args.contention_source = ContentionSource::KvTime;

    let report = execute_analyze(args).unwrap();
    assert_eq!(report.query.contention_time, std::time::Duration::from_millis(2));
}

#[test]
fn test_analyze_fails_when_no_topology_succeeds() {
    let (dir, mut args) = setup();
    let other_plan = write_json(dir.path(), "other.json", &json!({ "9": { "processors": [] } }));
    args.plan_paths = vec![other_plan];

    let err = execute_analyze(args).unwrap_err();
    assert!(err.to_string().contains("no topology produced statistics"));

    // Zero statistics and the errors are still written
    let report = read_report(dir.path().join("out/report.json")).unwrap();
    assert_eq!(report.source_topology, None);
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn test_analyze_rejects_bad_plan() {
    let (dir, mut args) = setup();
    args.plan_paths = vec![write_json(dir.path(), "bad.json", &json!("not a plan"))];

    assert!(execute_analyze(args).is_err());
}

#[test]
fn test_analyze_rejects_malformed_stats_payload() {
    let (dir, mut args) = setup();
    let trace = json!([{
        "structured": [{
            "component": { "type": "processor", "id": 99 },
            "stats": { "kv": { "bytes_read": "100" } }
        }]
    }]);
    args.trace_path = write_json(dir.path(), "bad_trace.json", &trace);

    let err = execute_analyze(args).unwrap_err();
    assert!(format!("{err:#}").contains("invalid component statistics payload"));
}
