//! End-to-end protocol compliance tests
//!
//! Each scenario drives a fresh server with raw payload text, compares the
//! wire-level response array against the expected JSON, and checks the
//! statistics the payload must have produced. The payloads are the worked
//! examples from the JSON-RPC 2.0 specification plus the failure modes
//! around them.

use jrpc_server::{from_fn, from_typed_fn, Server};
use serde::Deserialize;
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A server with the handler set used by the specification's examples.
fn spec_server() -> Server {
    let mut server = Server::new();

    // Accepts both calling conventions: positional [minuend, subtrahend]
    // and named {"minuend": m, "subtrahend": s}.
    server.set_handler("subtract", from_fn(|req| {
        let result = match &req.params {
            Some(jrpc_core::Params::Array(values)) => {
                let a = values.first().and_then(|v| v.as_f64()).unwrap_or(0.0);
                let b = values.get(1).and_then(|v| v.as_f64()).unwrap_or(0.0);
                a - b
            }
            Some(jrpc_core::Params::Object(map)) => {
                let a = map.get("minuend").and_then(|v| v.as_f64()).unwrap_or(0.0);
                let b = map.get("subtrahend").and_then(|v| v.as_f64()).unwrap_or(0.0);
                a - b
            }
            None => 0.0,
        };
        req.success_response(json!(result))
    }));

    server.set_handler("sum", from_fn(|req| {
        let total: f64 = match &req.params {
            Some(jrpc_core::Params::Array(values)) => {
                values.iter().filter_map(|v| v.as_f64()).sum()
            }
            _ => 0.0,
        };
        req.success_response(json!(total))
    }));

    server.set_handler("update", from_fn(|req| req.success_response(Value::Null)));
    server.set_handler("notify_hello", from_fn(|req| req.success_response(Value::Null)));
    server.set_handler("get_data", from_fn(|req| {
        req.success_response(json!(["hello", 5]))
    }));
    server.set_handler("boom", from_fn(|_req| panic!("ledger overflow")));

    server
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ExpectedStats {
    payloads: u64,
    requests: u64,
    success_responses: u64,
    error_responses: u64,
    success_notifications: u64,
    error_notifications: u64,
}

fn observed_stats(server: &Server) -> ExpectedStats {
    ExpectedStats {
        payloads: server.total_payloads(),
        requests: server.total_requests(),
        success_responses: server.total_success_responses(),
        error_responses: server.total_error_responses(),
        success_notifications: server.total_success_notifications(),
        error_notifications: server.total_error_notifications(),
    }
}

struct Scenario {
    name: &'static str,
    payload: &'static str,
    want: Value,
    stats: ExpectedStats,
}

#[test]
fn specification_examples() {
    init_tracing();

    let scenarios = vec![
        Scenario {
            name: "rpc call with positional parameters",
            payload: r#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 1}"#,
            want: json!([{"jsonrpc": "2.0", "id": 1, "result": 19.0}]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 1,
                success_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with positional parameters, reversed",
            payload: r#"{"jsonrpc": "2.0", "method": "subtract", "params": [23, 42], "id": 2}"#,
            want: json!([{"jsonrpc": "2.0", "id": 2, "result": -19.0}]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 1,
                success_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with named parameters",
            payload: r#"{"jsonrpc": "2.0", "method": "subtract", "params": {"subtrahend": 23, "minuend": 42}, "id": 3}"#,
            want: json!([{"jsonrpc": "2.0", "id": 3, "result": 19.0}]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 1,
                success_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with named parameters, other order",
            payload: r#"{"jsonrpc": "2.0", "method": "subtract", "params": {"minuend": 42, "subtrahend": 23}, "id": 4}"#,
            want: json!([{"jsonrpc": "2.0", "id": 4, "result": 19.0}]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 1,
                success_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with a fractional id",
            payload: r#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 2.5}"#,
            want: json!([{"jsonrpc": "2.0", "id": 2.5, "result": 19.0}]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 1,
                success_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with an id beyond the i64 range",
            payload: r#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 18446744073709551615}"#,
            want: json!([{"jsonrpc": "2.0", "id": 18446744073709551615u64, "result": 19.0}]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 1,
                success_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "a notification",
            payload: r#"{"jsonrpc": "2.0", "method": "update", "params": [1,2,3,4,5]}"#,
            want: json!([]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 1,
                success_notifications: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "a notification for a non-existent method",
            payload: r#"{"jsonrpc": "2.0", "method": "foobar"}"#,
            want: json!([]),
            stats: ExpectedStats {
                payloads: 1,
                error_notifications: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call of a non-existent method",
            payload: r#"{"jsonrpc": "2.0", "method": "foobar", "id": "1"}"#,
            want: json!([{
                "jsonrpc": "2.0",
                "id": "1",
                "error": {"code": -32601, "message": "Method not found"},
            }]),
            stats: ExpectedStats {
                payloads: 1,
                error_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with invalid JSON",
            payload: r#"{"jsonrpc": "2.0", "method": "foobar, "params": "bar", "baz]"#,
            want: json!([{
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32700, "message": "Parse error"},
            }]),
            stats: ExpectedStats {
                payloads: 1,
                error_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with an invalid request object",
            payload: r#"{"jsonrpc": "2.0", "method": 1, "params": "bar"}"#,
            want: json!([{
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32600, "message": "Method must be a string."},
            }]),
            stats: ExpectedStats {
                payloads: 1,
                error_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call batch with invalid JSON",
            payload: r#"[
                {"jsonrpc": "2.0", "method": "sum", "params": [1,2,4], "id": "1"},
                {"jsonrpc": "2.0", "method"
            ]"#,
            want: json!([{
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32700, "message": "Parse error"},
            }]),
            stats: ExpectedStats {
                payloads: 1,
                error_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with an empty array",
            payload: "[]",
            want: json!([{
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32600, "message": "Batch is empty."},
            }]),
            stats: ExpectedStats {
                payloads: 1,
                error_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with an invalid batch (but not empty)",
            payload: "[1]",
            want: json!([{
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32600, "message": "Invalid request"},
            }]),
            stats: ExpectedStats {
                payloads: 1,
                error_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with an invalid batch",
            payload: "[1,2,3]",
            want: json!([
                {"jsonrpc": "2.0", "id": null, "error": {"code": -32600, "message": "Invalid request"}},
                {"jsonrpc": "2.0", "id": null, "error": {"code": -32600, "message": "Invalid request"}},
                {"jsonrpc": "2.0", "id": null, "error": {"code": -32600, "message": "Invalid request"}},
            ]),
            stats: ExpectedStats {
                payloads: 1,
                error_responses: 3,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call batch",
            payload: r#"[
                {"jsonrpc": "2.0", "method": "sum", "params": [1,2,4], "id": "1"},
                {"jsonrpc": "2.0", "method": "notify_hello", "params": [7]},
                {"jsonrpc": "2.0", "method": "subtract", "params": [42,23], "id": "2"},
                {"foo": "boo"},
                {"jsonrpc": "2.0", "method": "foo.get", "params": {"name": "myself"}, "id": "5"},
                {"jsonrpc": "2.0", "method": "get_data", "id": "9"}
            ]"#,
            want: json!([
                {"jsonrpc": "2.0", "id": "1", "result": 7.0},
                {"jsonrpc": "2.0", "id": "2", "result": 19.0},
                {"jsonrpc": "2.0", "id": null, "error": {"code": -32600, "message": "Version (jsonrpc) must be a string."}},
                {"jsonrpc": "2.0", "id": "5", "error": {"code": -32601, "message": "Method not found"}},
                {"jsonrpc": "2.0", "id": "9", "result": ["hello", 5]},
            ]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 4,
                success_responses: 3,
                error_responses: 2,
                success_notifications: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call batch, all notifications",
            payload: r#"[
                {"jsonrpc": "2.0", "method": "notify_hello", "params": [1,2,4]},
                {"jsonrpc": "2.0", "method": "notify_hello", "params": [7]}
            ]"#,
            want: json!([]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 2,
                success_notifications: 2,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with wrong version",
            payload: r#"{"jsonrpc": "2", "method": "subtract", "params": [42, 23], "id": 2}"#,
            want: json!([{
                "jsonrpc": "2.0",
                "id": 2,
                "error": {"code": -32600, "message": "Version is not 2.0."},
            }]),
            stats: ExpectedStats {
                payloads: 1,
                error_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with a non-string version",
            payload: r#"{"jsonrpc": true, "method": "subtract", "params": [42, 23], "id": 2}"#,
            want: json!([{
                "jsonrpc": "2.0",
                "id": 2,
                "error": {"code": -32600, "message": "Version (jsonrpc) must be a string."},
            }]),
            stats: ExpectedStats {
                payloads: 1,
                error_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call with no version at all",
            payload: r#"{"method": "subtract", "params": [42, 23], "id": 2}"#,
            want: json!([{
                "jsonrpc": "2.0",
                "id": 2,
                "error": {"code": -32600, "message": "Version (jsonrpc) must be a string."},
            }]),
            stats: ExpectedStats {
                payloads: 1,
                error_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "rpc call whose handler panics",
            payload: r#"{"jsonrpc": "2.0", "method": "boom", "id": 6}"#,
            want: json!([{
                "jsonrpc": "2.0",
                "id": 6,
                "error": {"code": -32000, "message": "Server error"},
            }]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 1,
                error_responses: 1,
                ..Default::default()
            },
        },
        Scenario {
            name: "a notification whose handler panics",
            payload: r#"{"jsonrpc": "2.0", "method": "boom"}"#,
            want: json!([]),
            stats: ExpectedStats {
                payloads: 1,
                requests: 1,
                error_notifications: 1,
                ..Default::default()
            },
        },
    ];

    for scenario in scenarios {
        let server = spec_server();
        let responses = server.handle(scenario.payload);

        let got = serde_json::to_value(&responses).unwrap();
        assert_eq!(got, scenario.want, "responses for scenario: {}", scenario.name);
        assert_eq!(
            observed_stats(&server),
            scenario.stats,
            "stats for scenario: {}",
            scenario.name
        );
        assert_eq!(
            server.current_active_requests(),
            0,
            "gauge must settle for scenario: {}",
            scenario.name
        );
    }
}

#[test]
fn typed_handler_end_to_end() {
    init_tracing();

    #[derive(Deserialize)]
    struct SubtractParams {
        minuend: f64,
        subtrahend: f64,
    }

    let mut server = Server::new();
    server.set_handler(
        "subtract",
        from_typed_fn(|p: SubtractParams| Ok(p.minuend - p.subtrahend)),
    );

    let responses = server.handle(
        r#"{"jsonrpc": "2.0", "method": "subtract", "params": {"minuend": 42, "subtrahend": 23}, "id": 3}"#,
    );
    assert_eq!(
        serde_json::to_value(&responses).unwrap(),
        json!([{"jsonrpc": "2.0", "id": 3, "result": 19.0}])
    );

    // Positional params don't deserialize into the named struct.
    let responses = server.handle(
        r#"{"jsonrpc": "2.0", "method": "subtract", "params": [42, 23], "id": 4}"#,
    );
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].error_code(), jrpc_core::ErrorCode::InvalidParams);
}

#[test]
fn handler_reads_caller_state() {
    init_tracing();

    let mut server = Server::new();
    server.set_handler("whoami", from_fn(|req| {
        let user = req.state("user").cloned().unwrap_or(Value::Null);
        req.success_response(user)
    }));

    let mut state = jrpc_core::State::new();
    state.insert("user".to_string(), json!("alice"));

    let responses = server.handle_with_state(
        r#"{"jsonrpc": "2.0", "method": "whoami", "id": 1}"#,
        state,
    );
    assert_eq!(responses[0].result, Some(json!("alice")));

    // The plain entry point supplies an empty bag.
    let responses = server.handle(r#"{"jsonrpc": "2.0", "method": "whoami", "id": 2}"#);
    assert_eq!(responses[0].result, Some(Value::Null));
}

#[test]
fn handler_errors_in_the_server_band_keep_their_code() {
    init_tracing();
    use rand::Rng;

    // Any code in the band carries the same canonical message.
    let code = rand::thread_rng().gen_range(-32099..=-32000);

    let mut server = Server::new();
    server.set_handler("flaky", from_fn(move |req| {
        req.error_response(jrpc_core::ErrorCode::from_code(code), "")
    }));

    let responses = server.handle(r#"{"jsonrpc": "2.0", "method": "flaky", "id": 1}"#);
    assert_eq!(responses[0].error_code(), jrpc_core::ErrorCode::ServerError(code));
    assert_eq!(responses[0].error_message(), "Server error");
    assert_eq!(server.total_requests(), 1);
    assert_eq!(server.total_error_responses(), 1);
}

#[test]
fn active_request_gauge_tracks_a_running_handler() {
    init_tracing();
    use std::sync::mpsc;
    use std::sync::Mutex;

    // The handler reports in, then blocks until the test has observed the
    // gauge at 1.
    let (entered_tx, entered_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let entered_tx = Mutex::new(entered_tx);
    let release_rx = Mutex::new(release_rx);

    let mut server = Server::new();
    server.set_handler("slow", from_fn(move |req| {
        entered_tx.lock().unwrap().send(()).unwrap();
        release_rx.lock().unwrap().recv().unwrap();
        req.success_response(json!("done"))
    }));

    let worker = {
        let server = server.clone();
        std::thread::spawn(move || {
            server.handle(r#"{"jsonrpc": "2.0", "method": "slow", "id": 1}"#)
        })
    };

    entered_rx.recv().unwrap();
    assert_eq!(server.current_active_requests(), 1);

    release_tx.send(()).unwrap();
    let responses = worker.join().unwrap();
    assert_eq!(responses[0].result, Some(json!("done")));
    assert_eq!(server.current_active_requests(), 0);
    assert!(server.uptime() > std::time::Duration::ZERO);
}
