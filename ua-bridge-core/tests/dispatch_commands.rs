mod common;

use common::{init_tracing, parse_reply, request, write_node_id, MemoryStore, NodeRecord, Reply};
use std::sync::Arc;
use ua_bridge_core::protocol::term::{tag, TermReader};
use ua_bridge_core::{Dispatcher, EchoGuard, ProtocolError};
use ua_bridge_sdk::{NodeId, Scalar, TargetMode, ValueKind, Variant};

fn dispatcher() -> (Arc<MemoryStore>, Dispatcher<MemoryStore>) {
    init_tracing();
    let (store, _events) = MemoryStore::new();
    let store = Arc::new(store);
    let dispatcher = Dispatcher::new(store.clone(), Arc::new(EchoGuard::new()), TargetMode::Local);
    (store, dispatcher)
}

fn variable(store: &MemoryStore, id: u32) -> NodeId {
    let node_id = NodeId::numeric(1, id);
    store.insert(node_id.clone(), NodeRecord::default());
    node_id
}

#[tokio::test]
async fn test_command_replies_bare_ok() {
    let (_, dispatcher) = dispatcher();
    let body = dispatcher
        .dispatch(request("test", |_| {}))
        .await
        .unwrap();
    assert!(matches!(parse_reply(&body, "test"), Reply::Ok));
}

#[tokio::test]
async fn read_node_class_returns_class_text() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 1);

    let body = dispatcher
        .dispatch(request("read_node_node_class", |w| write_node_id(w, &node_id)))
        .await
        .unwrap();

    match parse_reply(&body, "read_node_node_class") {
        Reply::OkData(data) => {
            assert_eq!(data[0], tag::STRING_EXT);
            assert_eq!(&data[3..], b"Variable");
        }
        other => panic!("expected data reply, got {other:?}"),
    }
}

#[tokio::test]
async fn value_write_promotes_null_to_scalar() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 2);

    let body = dispatcher
        .dispatch(request("write_node_value", |w| {
            w.tuple_header(4);
            write_node_id(w, &node_id);
            w.u64(ValueKind::Int32 as u64);
            w.u64(0);
            w.i64(42);
        }))
        .await
        .unwrap();

    assert!(matches!(parse_reply(&body, "write_node_value"), Reply::Ok));
    assert_eq!(
        store.value_of(&node_id),
        Some(Variant::Scalar(Scalar::Int32(42)))
    );
}

#[tokio::test]
async fn value_write_overwrites_one_array_slot() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 3);
    store.insert(
        node_id.clone(),
        NodeRecord {
            value: Variant::blank_array(ValueKind::Int32, 3, vec![3]),
            ..NodeRecord::default()
        },
    );

    let body = dispatcher
        .dispatch(request("write_node_value", |w| {
            w.tuple_header(4);
            write_node_id(w, &node_id);
            w.u64(ValueKind::Int32 as u64);
            w.u64(2);
            w.i64(7);
        }))
        .await
        .unwrap();

    assert!(matches!(parse_reply(&body, "write_node_value"), Reply::Ok));
    match store.value_of(&node_id) {
        Some(Variant::Array { items, .. }) => {
            assert_eq!(
                items,
                vec![Scalar::Int32(0), Scalar::Int32(0), Scalar::Int32(7)]
            );
        }
        other => panic!("expected array value, got {other:?}"),
    }
}

#[tokio::test]
async fn value_write_out_of_range_index_is_type_mismatch() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 4);
    store.insert(
        node_id.clone(),
        NodeRecord {
            value: Variant::blank_array(ValueKind::Int32, 2, vec![2]),
            ..NodeRecord::default()
        },
    );

    let body = dispatcher
        .dispatch(request("write_node_value", |w| {
            w.tuple_header(4);
            write_node_id(w, &node_id);
            w.u64(ValueKind::Int32 as u64);
            w.u64(5);
            w.i64(1);
        }))
        .await
        .unwrap();

    match parse_reply(&body, "write_node_value") {
        Reply::ErrorStatus(reason) => assert_eq!(reason, "BadTypeMismatch"),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn value_write_kind_mismatch_against_array_is_type_mismatch() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 5);
    store.insert(
        node_id.clone(),
        NodeRecord {
            value: Variant::blank_array(ValueKind::Int32, 2, vec![2]),
            ..NodeRecord::default()
        },
    );

    let body = dispatcher
        .dispatch(request("write_node_value", |w| {
            w.tuple_header(4);
            write_node_id(w, &node_id);
            w.u64(ValueKind::Double as u64);
            w.u64(0);
            w.f64(1.5);
        }))
        .await
        .unwrap();

    match parse_reply(&body, "write_node_value") {
        Reply::ErrorStatus(reason) => assert_eq!(reason, "BadTypeMismatch"),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_array_builds_zeroed_typed_target() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 6);

    let body = dispatcher
        .dispatch(request("write_node_blank_array", |w| {
            w.tuple_header(5);
            write_node_id(w, &node_id);
            w.u64(ValueKind::Double as u64);
            w.u64(2);
            w.u64(6);
            w.tuple_header(2);
            w.u64(2);
            w.u64(3);
        }))
        .await
        .unwrap();

    assert!(matches!(
        parse_reply(&body, "write_node_blank_array"),
        Reply::Ok
    ));
    match store.value_of(&node_id) {
        Some(Variant::Array {
            kind,
            items,
            dimensions,
        }) => {
            assert_eq!(kind, ValueKind::Double);
            assert_eq!(items.len(), 6);
            assert!(items.iter().all(|s| *s == Scalar::Double(0.0)));
            assert_eq!(dimensions, vec![2, 3]);
        }
        other => panic!("expected array value, got {other:?}"),
    }
}

#[tokio::test]
async fn array_dimensions_arity_disagreement_is_fatal() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 7);

    let result = dispatcher
        .dispatch(request("write_node_array_dimensions", |w| {
            w.tuple_header(3);
            write_node_id(w, &node_id);
            w.u64(2);
            w.tuple_header(3);
            w.u64(1);
            w.u64(2);
            w.u64(3);
        }))
        .await;

    assert!(matches!(
        result,
        Err(ProtocolError::ArityMismatch {
            expected: 2,
            actual: 3,
            ..
        })
    ));
}

#[tokio::test]
async fn wrong_command_arity_is_fatal() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 8);

    let result = dispatcher
        .dispatch(request("delete_node", |w| {
            w.tuple_header(3);
            write_node_id(w, &node_id);
            w.boolean(true);
            w.u64(0);
        }))
        .await;

    assert!(matches!(result, Err(ProtocolError::ArityMismatch { .. })));
}

#[tokio::test]
async fn unknown_command_is_fatal() {
    let (_, dispatcher) = dispatcher();
    let result = dispatcher.dispatch(request("reboot", |_| {})).await;
    assert!(matches!(result, Err(ProtocolError::UnknownCommand(name)) if name == "reboot"));
}

#[tokio::test]
async fn store_failure_surfaces_status_mnemonic() {
    let (_, dispatcher) = dispatcher();
    let unknown = NodeId::numeric(1, 404);

    let body = dispatcher
        .dispatch(request("read_node_browse_name", |w| {
            write_node_id(w, &unknown)
        }))
        .await
        .unwrap();

    match parse_reply(&body, "read_node_browse_name") {
        Reply::ErrorStatus(reason) => assert_eq!(reason, "BadNodeIdUnknown"),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_user_field_degrades_to_einval() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 9);

    let body = dispatcher
        .dispatch(request("write_node_write_mask", |w| {
            w.tuple_header(2);
            write_node_id(w, &node_id);
            w.binary(b"not a number");
        }))
        .await
        .unwrap();

    match parse_reply(&body, "write_node_write_mask") {
        Reply::ErrorAtom(reason) => assert_eq!(reason, "einval"),
        other => panic!("expected einval, got {other:?}"),
    }
}

#[tokio::test]
async fn non_boolean_delete_flag_degrades_to_einval() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 16);

    let body = dispatcher
        .dispatch(request("delete_node", |w| {
            w.tuple_header(2);
            write_node_id(w, &node_id);
            w.u64(1);
        }))
        .await
        .unwrap();

    match parse_reply(&body, "delete_node") {
        Reply::ErrorAtom(reason) => assert_eq!(reason, "einval"),
        other => panic!("expected einval, got {other:?}"),
    }
    assert!(store.value_of(&node_id).is_some());
}

#[tokio::test]
async fn empty_value_reads_as_nil_marker() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 10);

    let body = dispatcher
        .dispatch(request("read_node_value", |w| {
            w.tuple_header(2);
            write_node_id(w, &node_id);
            w.u64(0);
        }))
        .await
        .unwrap();

    match parse_reply(&body, "read_node_value") {
        Reply::OkData(data) => {
            let mut r = TermReader::new(data);
            assert_eq!(r.read_atom("value").unwrap(), "nil");
        }
        other => panic!("expected data reply, got {other:?}"),
    }
}

#[tokio::test]
async fn read_by_index_covers_scalar_array_and_empty() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 11);
    store.insert(
        node_id.clone(),
        NodeRecord {
            value: Variant::Array {
                kind: ValueKind::Int32,
                items: vec![Scalar::Int32(10), Scalar::Int32(20)],
                dimensions: vec![2],
            },
            ..NodeRecord::default()
        },
    );

    let by_index = |index: u64| {
        request("read_node_value_by_index", |w| {
            w.tuple_header(2);
            write_node_id(w, &node_id);
            w.u64(index);
        })
    };

    let body = dispatcher.dispatch(by_index(1)).await.unwrap();
    match parse_reply(&body, "read_node_value_by_index") {
        Reply::OkData(data) => {
            let mut r = TermReader::new(data);
            assert_eq!(r.read_i64("element").unwrap(), 20);
        }
        other => panic!("expected data reply, got {other:?}"),
    }

    let body = dispatcher.dispatch(by_index(9)).await.unwrap();
    match parse_reply(&body, "read_node_value_by_index") {
        Reply::ErrorStatus(reason) => assert_eq!(reason, "BadTypeMismatch"),
        other => panic!("expected status error, got {other:?}"),
    }

    let empty = variable(&store, 12);
    let body = dispatcher
        .dispatch(request("read_node_value_by_index", |w| {
            w.tuple_header(2);
            write_node_id(w, &empty);
            w.u64(0);
        }))
        .await
        .unwrap();
    match parse_reply(&body, "read_node_value_by_index") {
        Reply::ErrorAtom(reason) => assert_eq!(reason, "nil"),
        other => panic!("expected nil error, got {other:?}"),
    }
}

#[tokio::test]
async fn read_by_data_type_trusts_and_checks_kind() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 13);
    store.insert(
        node_id.clone(),
        NodeRecord {
            value: Variant::Scalar(Scalar::Double(2.5)),
            ..NodeRecord::default()
        },
    );

    let by_data_type = |code: u64| {
        request("read_node_value_by_data_type", |w| {
            w.tuple_header(2);
            write_node_id(w, &node_id);
            w.u64(code);
        })
    };

    let body = dispatcher
        .dispatch(by_data_type(ValueKind::Double as u64))
        .await
        .unwrap();
    match parse_reply(&body, "read_node_value_by_data_type") {
        Reply::OkData(data) => {
            let mut r = TermReader::new(data);
            assert_eq!(r.read_f64("element").unwrap(), 2.5);
        }
        other => panic!("expected data reply, got {other:?}"),
    }

    let body = dispatcher
        .dispatch(by_data_type(ValueKind::Int32 as u64))
        .await
        .unwrap();
    match parse_reply(&body, "read_node_value_by_data_type") {
        Reply::ErrorAtom(reason) => assert_eq!(reason, "eagain"),
        other => panic!("expected eagain, got {other:?}"),
    }
}

#[tokio::test]
async fn add_and_delete_node_round_trip() {
    let (store, dispatcher) = dispatcher();
    let node_id = NodeId::string(2, "demo.variable");
    let parent = NodeId::numeric(0, 85);

    let body = dispatcher
        .dispatch(request("add_variable_node", |w| {
            w.tuple_header(5);
            write_node_id(w, &node_id);
            write_node_id(w, &parent);
            write_node_id(w, &NodeId::numeric(0, 35));
            w.tuple_header(2);
            w.u64(2);
            w.binary(b"demo.variable");
            write_node_id(w, &NodeId::numeric(0, 63));
        }))
        .await
        .unwrap();
    assert!(matches!(parse_reply(&body, "add_variable_node"), Reply::Ok));
    assert!(store.value_of(&node_id).is_some());

    let body = dispatcher
        .dispatch(request("delete_node", |w| {
            w.tuple_header(2);
            write_node_id(w, &node_id);
            w.boolean(true);
        }))
        .await
        .unwrap();
    assert!(matches!(parse_reply(&body, "delete_node"), Reply::Ok));
    assert!(store.value_of(&node_id).is_none());
}

#[tokio::test]
async fn view_node_argument_tuple_has_no_type_definition() {
    let (store, dispatcher) = dispatcher();
    let node_id = NodeId::string(2, "demo.view");

    let body = dispatcher
        .dispatch(request("add_view_node", |w| {
            w.tuple_header(4);
            write_node_id(w, &node_id);
            write_node_id(w, &NodeId::numeric(0, 87));
            write_node_id(w, &NodeId::numeric(0, 35));
            w.tuple_header(2);
            w.u64(2);
            w.binary(b"demo.view");
        }))
        .await
        .unwrap();

    assert!(matches!(parse_reply(&body, "add_view_node"), Reply::Ok));
    assert!(store.value_of(&node_id).is_some());
}

#[tokio::test]
async fn display_name_write_takes_inline_locale_and_text() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 14);

    let body = dispatcher
        .dispatch(request("write_node_display_name", |w| {
            w.tuple_header(3);
            write_node_id(w, &node_id);
            w.binary(b"en-US");
            w.binary(b"Temperature");
        }))
        .await
        .unwrap();
    assert!(matches!(
        parse_reply(&body, "write_node_display_name"),
        Reply::Ok
    ));

    let body = dispatcher
        .dispatch(request("read_node_display_name", |w| {
            write_node_id(w, &node_id)
        }))
        .await
        .unwrap();
    match parse_reply(&body, "read_node_display_name") {
        Reply::OkData(data) => {
            let mut r = TermReader::new(data);
            r.expect_tuple("localized_text", 2).unwrap();
            assert_eq!(r.read_binary_string("locale").unwrap(), "en-US");
            assert_eq!(r.read_binary_string("text").unwrap(), "Temperature");
        }
        other => panic!("expected data reply, got {other:?}"),
    }
}

#[tokio::test]
async fn subscription_and_monitored_item_ids_are_returned() {
    let (store, dispatcher) = dispatcher();
    let node_id = variable(&store, 15);

    let body = dispatcher
        .dispatch(request("subscription_create", |w| {
            w.f64(500.0);
        }))
        .await
        .unwrap();
    let subscription_id = match parse_reply(&body, "subscription_create") {
        Reply::OkData(data) => TermReader::new(data).read_u32("sub").unwrap(),
        other => panic!("expected data reply, got {other:?}"),
    };

    let body = dispatcher
        .dispatch(request("monitored_item_create", |w| {
            w.tuple_header(3);
            write_node_id(w, &node_id);
            w.u64(u64::from(subscription_id));
            w.f64(100.0);
        }))
        .await
        .unwrap();
    match parse_reply(&body, "monitored_item_create") {
        Reply::OkData(data) => {
            assert!(TermReader::new(data).read_u32("mon").unwrap() > 0);
        }
        other => panic!("expected data reply, got {other:?}"),
    }
}
