#![allow(dead_code)]

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, Once};
use tokio::sync::mpsc;
use ua_bridge_core::protocol::envelope::RESPONSE_ID;
use ua_bridge_core::protocol::term::{tag, TermReader, TermWriter};
use ua_bridge_sdk::{
    AddNodeRequest, ExpandedNodeId, LocalizedText, NodeClass, NodeId, NodeStore, QualifiedName,
    StatusCode, StoreError, StoreEvent, StoreEventSender, StoreResult, TargetMode, Variant,
};

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// One node's attribute set, all defaulted so tests only touch what they
/// assert on.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub node_class: NodeClass,
    pub browse_name: QualifiedName,
    pub display_name: LocalizedText,
    pub description: LocalizedText,
    pub inverse_name: LocalizedText,
    pub write_mask: u32,
    pub is_abstract: bool,
    pub symmetric: bool,
    pub contains_no_loops: bool,
    pub event_notifier: u8,
    pub value_rank: i32,
    pub array_dimensions: Vec<u32>,
    pub access_level: u8,
    pub minimum_sampling_interval: f64,
    pub historizing: bool,
    pub executable: bool,
    pub data_type: NodeId,
    pub value: Variant,
}

impl Default for NodeRecord {
    fn default() -> Self {
        Self {
            node_class: NodeClass::Variable,
            browse_name: QualifiedName::new(0, ""),
            display_name: LocalizedText::default(),
            description: LocalizedText::default(),
            inverse_name: LocalizedText::default(),
            write_mask: 0,
            is_abstract: false,
            symmetric: false,
            contains_no_loops: false,
            event_notifier: 0,
            value_rank: -1,
            array_dimensions: Vec::new(),
            access_level: 0,
            minimum_sampling_interval: 0.0,
            historizing: false,
            executable: false,
            data_type: NodeId::numeric(0, 0),
            value: Variant::Empty,
        }
    }
}

/// In-memory node store. Value writes publish a value-changed event the way
/// a live address space does, so echo suppression is observable in tests.
pub struct MemoryStore {
    nodes: Mutex<HashMap<NodeId, NodeRecord>>,
    events: StoreEventSender,
    next_id: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StoreEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                nodes: Mutex::new(HashMap::new()),
                events: tx,
                next_id: AtomicU32::new(1),
            },
            rx,
        )
    }

    pub fn insert(&self, node_id: NodeId, record: NodeRecord) {
        self.nodes.lock().unwrap().insert(node_id, record);
    }

    pub fn value_of(&self, node_id: &NodeId) -> Option<Variant> {
        self.nodes.lock().unwrap().get(node_id).map(|n| n.value.clone())
    }

    /// Simulate a write arriving from the store's own peer side: the value
    /// changes and the event fires without any local mark.
    pub fn peer_write(&self, node_id: &NodeId, value: Variant) {
        if let Some(record) = self.nodes.lock().unwrap().get_mut(node_id) {
            record.value = value.clone();
        }
        let _ = self.events.send(StoreEvent::ValueWritten {
            node_id: node_id.clone(),
            value,
        });
    }

    pub fn publish(&self, event: StoreEvent) {
        let _ = self.events.send(event);
    }

    fn with_node<R>(
        &self,
        node_id: &NodeId,
        f: impl FnOnce(&mut NodeRecord) -> R,
    ) -> StoreResult<R> {
        let mut nodes = self.nodes.lock().unwrap();
        let record = nodes
            .get_mut(node_id)
            .ok_or(StoreError::Status(StatusCode::BAD_NODE_ID_UNKNOWN))?;
        Ok(f(record))
    }
}

#[async_trait::async_trait]
impl NodeStore for MemoryStore {
    async fn add_variable_node(&self, _mode: TargetMode, req: AddNodeRequest) -> StoreResult<()> {
        self.insert(req.requested_new_node_id.clone(), NodeRecord::default());
        Ok(())
    }

    async fn add_variable_type_node(
        &self,
        _mode: TargetMode,
        req: AddNodeRequest,
    ) -> StoreResult<()> {
        self.insert(
            req.requested_new_node_id.clone(),
            NodeRecord {
                node_class: NodeClass::VariableType,
                ..NodeRecord::default()
            },
        );
        Ok(())
    }

    async fn add_object_node(&self, _mode: TargetMode, req: AddNodeRequest) -> StoreResult<()> {
        self.insert(
            req.requested_new_node_id.clone(),
            NodeRecord {
                node_class: NodeClass::Object,
                ..NodeRecord::default()
            },
        );
        Ok(())
    }

    async fn add_object_type_node(
        &self,
        _mode: TargetMode,
        req: AddNodeRequest,
    ) -> StoreResult<()> {
        self.insert(
            req.requested_new_node_id.clone(),
            NodeRecord {
                node_class: NodeClass::ObjectType,
                ..NodeRecord::default()
            },
        );
        Ok(())
    }

    async fn add_view_node(&self, _mode: TargetMode, req: AddNodeRequest) -> StoreResult<()> {
        self.insert(
            req.requested_new_node_id.clone(),
            NodeRecord {
                node_class: NodeClass::View,
                ..NodeRecord::default()
            },
        );
        Ok(())
    }

    async fn add_reference_type_node(
        &self,
        _mode: TargetMode,
        req: AddNodeRequest,
    ) -> StoreResult<()> {
        self.insert(
            req.requested_new_node_id.clone(),
            NodeRecord {
                node_class: NodeClass::ReferenceType,
                ..NodeRecord::default()
            },
        );
        Ok(())
    }

    async fn add_data_type_node(&self, _mode: TargetMode, req: AddNodeRequest) -> StoreResult<()> {
        self.insert(
            req.requested_new_node_id.clone(),
            NodeRecord {
                node_class: NodeClass::DataType,
                ..NodeRecord::default()
            },
        );
        Ok(())
    }

    async fn delete_node(
        &self,
        _mode: TargetMode,
        node_id: NodeId,
        _delete_references: bool,
    ) -> StoreResult<()> {
        self.nodes
            .lock()
            .unwrap()
            .remove(&node_id)
            .map(|_| ())
            .ok_or(StoreError::Status(StatusCode::BAD_NODE_ID_UNKNOWN))
    }

    async fn delete_reference(
        &self,
        _mode: TargetMode,
        _source_id: NodeId,
        _reference_type_id: NodeId,
        _target_id: ExpandedNodeId,
        _is_forward: bool,
        _delete_bidirectional: bool,
    ) -> StoreResult<()> {
        Ok(())
    }

    async fn read_node_id(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<NodeId> {
        self.with_node(node_id, |_| node_id.clone())
    }

    async fn read_node_class(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<NodeClass> {
        self.with_node(node_id, |n| n.node_class)
    }

    async fn read_browse_name(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<QualifiedName> {
        self.with_node(node_id, |n| n.browse_name.clone())
    }

    async fn read_display_name(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<LocalizedText> {
        self.with_node(node_id, |n| n.display_name.clone())
    }

    async fn read_description(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<LocalizedText> {
        self.with_node(node_id, |n| n.description.clone())
    }

    async fn read_write_mask(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<u32> {
        self.with_node(node_id, |n| n.write_mask)
    }

    async fn read_is_abstract(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<bool> {
        self.with_node(node_id, |n| n.is_abstract)
    }

    async fn read_symmetric(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<bool> {
        self.with_node(node_id, |n| n.symmetric)
    }

    async fn read_inverse_name(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<LocalizedText> {
        self.with_node(node_id, |n| n.inverse_name.clone())
    }

    async fn read_contains_no_loops(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<bool> {
        self.with_node(node_id, |n| n.contains_no_loops)
    }

    async fn read_event_notifier(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<u8> {
        self.with_node(node_id, |n| n.event_notifier)
    }

    async fn read_value_rank(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<i32> {
        self.with_node(node_id, |n| n.value_rank)
    }

    async fn read_array_dimensions(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<Vec<u32>> {
        self.with_node(node_id, |n| n.array_dimensions.clone())
    }

    async fn read_access_level(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<u8> {
        self.with_node(node_id, |n| n.access_level)
    }

    async fn read_minimum_sampling_interval(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<f64> {
        self.with_node(node_id, |n| n.minimum_sampling_interval)
    }

    async fn read_historizing(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<bool> {
        self.with_node(node_id, |n| n.historizing)
    }

    async fn read_executable(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<bool> {
        self.with_node(node_id, |n| n.executable)
    }

    async fn read_data_type(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<NodeId> {
        self.with_node(node_id, |n| n.data_type.clone())
    }

    async fn read_value(&self, _mode: TargetMode, node_id: &NodeId) -> StoreResult<Variant> {
        self.with_node(node_id, |n| n.value.clone())
    }

    async fn write_browse_name(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: QualifiedName,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.browse_name = value)
    }

    async fn write_display_name(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: LocalizedText,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.display_name = value)
    }

    async fn write_description(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: LocalizedText,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.description = value)
    }

    async fn write_write_mask(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: u32,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.write_mask = value)
    }

    async fn write_is_abstract(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: bool,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.is_abstract = value)
    }

    async fn write_inverse_name(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: LocalizedText,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.inverse_name = value)
    }

    async fn write_data_type(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: NodeId,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.data_type = value)
    }

    async fn write_value_rank(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: i32,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.value_rank = value)
    }

    async fn write_array_dimensions(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: Vec<u32>,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.array_dimensions = value)
    }

    async fn write_access_level(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: u8,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.access_level = value)
    }

    async fn write_minimum_sampling_interval(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: f64,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.minimum_sampling_interval = value)
    }

    async fn write_historizing(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: bool,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.historizing = value)
    }

    async fn write_executable(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: bool,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.executable = value)
    }

    async fn write_event_notifier(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: u8,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.event_notifier = value)
    }

    async fn write_value(
        &self,
        _mode: TargetMode,
        node_id: &NodeId,
        value: Variant,
    ) -> StoreResult<()> {
        self.with_node(node_id, |n| n.value = value.clone())?;
        let _ = self.events.send(StoreEvent::ValueWritten {
            node_id: node_id.clone(),
            value,
        });
        Ok(())
    }

    async fn create_subscription(
        &self,
        _mode: TargetMode,
        _publishing_interval_ms: f64,
    ) -> StoreResult<u32> {
        Ok(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    async fn delete_subscription(
        &self,
        _mode: TargetMode,
        _subscription_id: u32,
    ) -> StoreResult<()> {
        Ok(())
    }

    async fn create_monitored_item(
        &self,
        _mode: TargetMode,
        _subscription_id: u32,
        node_id: NodeId,
        _sampling_interval_ms: f64,
    ) -> StoreResult<u32> {
        self.with_node(&node_id, |_| ())?;
        Ok(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    async fn delete_monitored_item(
        &self,
        _mode: TargetMode,
        _subscription_id: u32,
        _monitored_item_id: u32,
    ) -> StoreResult<()> {
        Ok(())
    }
}

// ===== request/reply wire helpers =====

pub const META_TOKEN: u64 = 9001;

/// Build one inbound request body: version + {command, metadata, args...}.
///
/// `args` writes the argument terms directly after the metadata slot, so a
/// handler expecting a tuple gets whatever shape the closure emits.
pub fn request(command: &str, args: impl FnOnce(&mut TermWriter)) -> Bytes {
    let mut w = TermWriter::new();
    w.version();
    w.tuple_header(3);
    w.atom(command);
    w.u64(META_TOKEN);
    args(&mut w);
    w.into_bytes()
}

pub fn write_node_id(w: &mut TermWriter, node_id: &NodeId) {
    use ua_bridge_sdk::NodeIdPayload;
    w.tuple_header(3);
    w.u64(u64::from(node_id.payload.discriminant()));
    w.u64(u64::from(node_id.namespace));
    match &node_id.payload {
        NodeIdPayload::Numeric(v) => {
            w.u64(u64::from(*v));
        }
        NodeIdPayload::String(v) => {
            w.binary(v.as_bytes());
        }
        NodeIdPayload::Guid(g) => {
            w.tuple_header(4);
            w.u64(u64::from(g.data1));
            w.u64(u64::from(g.data2));
            w.u64(u64::from(g.data3));
            w.binary(&g.data4);
        }
        NodeIdPayload::ByteString(v) => {
            w.binary(v);
        }
    }
}

/// Decoded reply body.
#[derive(Debug)]
pub enum Reply {
    Ok,
    /// Raw term bytes of the data payload inside `{:ok, data}`.
    OkData(Bytes),
    ErrorAtom(String),
    ErrorStatus(String),
}

/// Parse a reply body, asserting on the envelope along the way.
pub fn parse_reply(body: &Bytes, command: &str) -> Reply {
    assert_eq!(body[0], RESPONSE_ID);
    let mut r = TermReader::new(body.slice(1..));
    r.expect_version().unwrap();
    r.expect_tuple("reply", 3).unwrap();
    assert_eq!(r.read_atom("command").unwrap(), command);
    assert_eq!(r.read_u64("metadata").unwrap(), META_TOKEN);

    match r.peek_tag().unwrap() {
        tag::ATOM_EXT | tag::ATOM_UTF8_EXT | tag::SMALL_ATOM_UTF8_EXT => {
            assert_eq!(r.read_atom("result").unwrap(), "ok");
            Reply::Ok
        }
        _ => {
            r.expect_tuple("result", 2).unwrap();
            match r.read_atom("tag").unwrap().as_str() {
                "ok" => Reply::OkData(r.skip_term().unwrap()),
                "error" => match r.peek_tag().unwrap() {
                    tag::BINARY_EXT => {
                        Reply::ErrorStatus(r.read_binary_string("reason").unwrap())
                    }
                    _ => Reply::ErrorAtom(r.read_atom("reason").unwrap()),
                },
                other => panic!("unexpected result tag {other}"),
            }
        }
    }
}
