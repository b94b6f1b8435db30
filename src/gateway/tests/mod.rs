//! Unit tests for gateway module
//!
//! Tests status checking, response shaping and the replay gateway.

#![allow(clippy::panic)]

use std::{fs, sync::Arc};

use serde_json::json;
use tempfile::TempDir;

use crate::{
    cli::CommandError,
    gateway::{
        Disconnected, Gateway, GatewayClient, ReplayError, ReplayGateway, TransportError,
        models::{GATEWAY_INFO, NAMESPACE_LIST, NSID_STATUS, SUBSYSTEM},
    },
    mapper::{Attributes, MapError, Mapper, Source, Value},
};

fn client(gateway: ReplayGateway) -> (GatewayClient, Arc<ReplayGateway>) {
    let gateway = Arc::new(gateway);
    let client = GatewayClient::new(gateway.clone(), Mapper::default());
    (client, gateway)
}

fn empty_request() -> Source {
    Source::mapping::<&str, _>([])
}

#[derive(Debug)]
struct StatusReply {
    status: i64,
    message: &'static str,
}

impl Attributes for StatusReply {
    fn attribute(&self, name: &str) -> Option<Source> {
        match name {
            "status" => Some(Source::Int(self.status)),
            "error_message" => Some(Source::from(self.message)),
            _ => None,
        }
    }
}

mod checked_calls {
    use super::*;

    #[test]
    fn transport_failure_is_remote_unavailable() {
        let (client, _) = client(ReplayGateway::new().fail(
            "list_subsystems",
            TransportError::new("UNAVAILABLE", "down"),
        ));

        let err = client
            .call("list_subsystems", &empty_request())
            .unwrap_err();

        match &err {
            CommandError::RemoteUnavailable { code, details } => {
                assert_eq!(code, "UNAVAILABLE");
                assert_eq!(details, "down");
            }
            other => panic!("expected remote unavailable, got {other:?}"),
        }
        assert_eq!(err.exit_code(), Some(-libc::EHOSTUNREACH));
    }

    #[test]
    fn non_zero_status_is_remote_rejected() {
        let (client, _) = client(ReplayGateway::new().respond(
            "create_subsystem",
            json!({"status": 17, "error_message": "subsystem already exists"}),
        ));

        let err = client.empty("create_subsystem", &empty_request()).unwrap_err();

        match err {
            CommandError::RemoteRejected { status, message } => {
                assert_eq!(status, 17);
                assert_eq!(message, "subsystem already exists");
            }
            other => panic!("expected remote rejected, got {other:?}"),
        }
    }

    #[test]
    fn status_read_from_attribute_object() {
        let (client, _) = client(ReplayGateway::new().respond(
            "namespace_delete",
            Source::object(StatusReply {
                status: 2,
                message: "no such namespace",
            }),
        ));

        let err = client.empty("namespace_delete", &empty_request()).unwrap_err();

        assert!(err.to_string().contains("no such namespace"));
    }

    #[test]
    fn missing_status_counts_as_success() {
        let (client, gateway) = client(ReplayGateway::new().respond("namespace_delete", json!({})));

        client.empty("namespace_delete", &empty_request()).unwrap();

        assert_eq!(gateway.called_methods(), ["namespace_delete"]);
    }

    #[test]
    fn non_integer_status_is_rejected() {
        let cases = [
            (json!({"status": 2.0, "error_message": "boom"}), 2),
            (json!({"status": "2", "error_message": "boom"}), 2),
            (json!({"status": "0", "error_message": "boom"}), -1),
            (json!({"status": 1.5, "error_message": "boom"}), -1),
            (json!({"status": [0], "error_message": "boom"}), -1),
        ];

        for (response, expected) in cases {
            let (client, _) = client(ReplayGateway::new().respond("delete_subsystem", response));

            let err = client.call("delete_subsystem", &empty_request()).unwrap_err();

            match err {
                CommandError::RemoteRejected { status, message } => {
                    assert_eq!(status, expected);
                    assert_eq!(message, "boom");
                }
                other => panic!("expected remote rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn zero_float_status_counts_as_success() {
        let (client, _) =
            client(ReplayGateway::new().respond("delete_subsystem", json!({"status": 0.0})));

        client.call("delete_subsystem", &empty_request()).unwrap();
    }

    #[test]
    fn requests_are_forwarded() {
        let (client, gateway) = client(ReplayGateway::new().respond("list_subsystems", json!({})));
        let request = Source::mapping([("subsystem_nqn", Source::from("nqn.a"))]);

        client.call("list_subsystems", &request).unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].1.lookup("subsystem_nqn").and_then(|v| v.as_str().map(str::to_string)),
            Some("nqn.a".to_string())
        );
    }

    #[test]
    fn disconnected_gateway_always_fails() {
        let err = Disconnected
            .call("get_gateway_info", &empty_request())
            .unwrap_err();

        assert_eq!(err.code, "UNAVAILABLE");
        assert!(err.details.contains("get_gateway_info"));
    }
}

mod shaping {
    use super::*;

    #[test]
    fn model_shapes_whole_response() {
        let (client, _) = client(ReplayGateway::new().respond(
            "get_gateway_info",
            json!({"status": 0, "name": "gw-1", "group": "east", "max_subsystems": 128}),
        ));

        let info = client
            .model("get_gateway_info", &empty_request(), &GATEWAY_INFO)
            .unwrap();

        assert_eq!(info.get("name"), Some(&Value::from("gw-1")));
        assert_eq!(info.get("max_subsystems"), Some(&Value::from(128_i64)));
        assert_eq!(info.get("spdk_version"), Some(&Value::Null));
    }

    #[test]
    fn first_picks_first_entry() {
        let (client, _) = client(ReplayGateway::new().respond(
            "list_subsystems",
            json!({"status": 0, "subsystems": [{"nqn": "nqn.a"}, {"nqn": "nqn.b"}]}),
        ));

        let subsystem = client
            .first("list_subsystems", &empty_request(), "subsystems", &SUBSYSTEM)
            .unwrap();

        assert_eq!(subsystem.get("nqn").and_then(Value::as_str), Some("nqn.a"));
    }

    #[test]
    fn first_of_empty_collection_is_not_found() {
        let (client, _) = client(
            ReplayGateway::new().respond("list_subsystems", json!({"status": 0, "subsystems": []})),
        );

        let err = client
            .first("list_subsystems", &empty_request(), "subsystems", &SUBSYSTEM)
            .unwrap_err();

        assert!(matches!(err, CommandError::NotFound(ref name) if name == "Subsystem"));
        assert_eq!(err.exit_code(), Some(-libc::ENOENT));
    }

    #[test]
    fn collection_missing_field_is_empty() {
        let (client, _) =
            client(ReplayGateway::new().respond("list_subsystems", json!({"status": 0})));

        let subsystems = client
            .collection("list_subsystems", &empty_request(), "subsystems", &SUBSYSTEM)
            .unwrap();

        assert!(subsystems.is_empty());
    }

    #[test]
    fn collection_shapes_each_entry() {
        let (client, _) = client(ReplayGateway::new().respond(
            "list_subsystems",
            json!({"subsystems": [{"nqn": "nqn.a", "namespace_count": 2}, {"nqn": "nqn.b"}]}),
        ));

        let subsystems = client
            .collection("list_subsystems", &empty_request(), "subsystems", &SUBSYSTEM)
            .unwrap();

        assert_eq!(subsystems.len(), 2);
        assert_eq!(subsystems[0].get("namespace_count"), Some(&Value::from(2_i64)));
        assert_eq!(subsystems[1].get("namespace_count"), Some(&Value::Null));
    }

    #[test]
    fn namespace_hosts_fit_default_depth() {
        let (client, _) = client(ReplayGateway::new().respond(
            "list_namespaces",
            json!({
                "status": 0,
                "subsystem_nqn": "nqn.a",
                "namespaces": [{"nsid": 1, "hosts": ["nqn.host1", "nqn.host2"]}],
            }),
        ));

        let list = client
            .model("list_namespaces", &empty_request(), &NAMESPACE_LIST)
            .unwrap();

        let namespaces = list.get("namespaces").and_then(Value::as_sequence).unwrap();
        let hosts = namespaces[0]
            .as_record()
            .and_then(|ns| ns.get("hosts"))
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(hosts.len(), 2);
    }

    #[test]
    fn pick_returns_single_field() {
        let (client, _) = client(
            ReplayGateway::new().respond("namespace_add", json!({"status": 0, "nsid": 9})),
        );

        let nsid = client
            .pick("namespace_add", &empty_request(), "nsid", &NSID_STATUS)
            .unwrap();
        let undeclared = client
            .pick("namespace_add", &empty_request(), "uuid", &NSID_STATUS)
            .unwrap();

        assert_eq!(nsid, Value::from(9_i64));
        assert!(undeclared.is_null());
    }

    #[test]
    fn shallow_mapper_reports_depth() {
        let gateway = Arc::new(ReplayGateway::new().respond(
            "list_namespaces",
            json!({"namespaces": [{"nsid": 1, "hosts": ["nqn.host1"]}]}),
        ));
        let client = GatewayClient::new(gateway, Mapper::new(3));

        let err = client
            .model("list_namespaces", &empty_request(), &NAMESPACE_LIST)
            .unwrap_err();

        match err {
            CommandError::Mapping(MapError::DepthExceeded { depth, max_depth, .. }) => {
                assert_eq!(depth, 4);
                assert_eq!(max_depth, 3);
            }
            other => panic!("expected depth error, got {other:?}"),
        }
    }
}

mod replay {
    use super::*;

    #[test]
    fn unscripted_method_is_unimplemented() {
        let err = ReplayGateway::new()
            .call("list_hosts", &empty_request())
            .unwrap_err();

        assert_eq!(err.code, "UNIMPLEMENTED");
    }

    #[test]
    fn loads_responses_and_failures_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("replay.json");
        fs::write(
            &path,
            r#"{
                "get_gateway_info": {"status": 0, "name": "gw-1"},
                "list_hosts": {"$transport_error": {"code": "DEADLINE_EXCEEDED", "details": "slow"}}
            }"#,
        )
        .unwrap();

        let gateway = ReplayGateway::from_file(&path).unwrap();

        let info = gateway.call("get_gateway_info", &empty_request()).unwrap();
        assert_eq!(
            info.lookup("name").and_then(|v| v.as_str().map(str::to_string)),
            Some("gw-1".to_string())
        );

        let err = gateway.call("list_hosts", &empty_request()).unwrap_err();
        assert_eq!(err, TransportError::new("DEADLINE_EXCEEDED", "slow"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();

        let err = ReplayGateway::from_file(&dir.path().join("absent.json")).unwrap_err();

        assert!(matches!(err, ReplayError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("replay.json");
        fs::write(&path, r#"["not", "an", "object"]"#).unwrap();

        let err = ReplayGateway::from_file(&path).unwrap_err();

        assert!(matches!(err, ReplayError::Parse { .. }));
    }

    #[test]
    fn malformed_transport_error_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("replay.json");
        fs::write(&path, r#"{"list_hosts": {"$transport_error": {"code": 1}}}"#).unwrap();

        let err = ReplayGateway::from_file(&path).unwrap_err();

        assert!(matches!(err, ReplayError::Parse { .. }));
    }
}
