use crate::error::StoreResult;
use crate::types::{
    ExpandedNodeId, LocalizedText, NodeClass, NodeId, QualifiedName, TargetMode,
};
use crate::value::Variant;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Arguments shared by all node-addition operations. `type_definition` is
/// ignored by the node classes that do not carry one.
#[derive(Debug, Clone, PartialEq)]
pub struct AddNodeRequest {
    pub requested_new_node_id: NodeId,
    pub parent_node_id: NodeId,
    pub reference_type_node_id: NodeId,
    pub browse_name: QualifiedName,
    pub type_definition: Option<NodeId>,
}

/// Server-initiated event emitted by a node store.
///
/// Events carry no caller correlation; consumers distinguish them from
/// command responses structurally.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A value attribute changed on a locally managed node.
    ValueWritten { node_id: NodeId, value: Variant },
    /// A monitored item published a new sample.
    DataChanged {
        subscription_id: u32,
        monitored_item_id: u32,
        value: Variant,
    },
    SubscriptionDeleted { subscription_id: u32 },
    SubscriptionTimeout { subscription_id: u32 },
    MonitoredItemDeleted {
        subscription_id: u32,
        monitored_item_id: u32,
    },
}

pub type StoreEventSender = mpsc::UnboundedSender<StoreEvent>;

/// Capability contract of the underlying node-graph backend.
///
/// Every operation takes a [`TargetMode`] selecting the local in-process
/// address space or a remote-connection-backed one; both families expose
/// identical semantics. Implementations are external to this workspace.
#[async_trait]
pub trait NodeStore: Send + Sync + 'static {
    // ===== node lifecycle =====
    async fn add_variable_node(&self, mode: TargetMode, req: AddNodeRequest) -> StoreResult<()>;
    async fn add_variable_type_node(&self, mode: TargetMode, req: AddNodeRequest)
        -> StoreResult<()>;
    async fn add_object_node(&self, mode: TargetMode, req: AddNodeRequest) -> StoreResult<()>;
    async fn add_object_type_node(&self, mode: TargetMode, req: AddNodeRequest) -> StoreResult<()>;
    async fn add_view_node(&self, mode: TargetMode, req: AddNodeRequest) -> StoreResult<()>;
    async fn add_reference_type_node(
        &self,
        mode: TargetMode,
        req: AddNodeRequest,
    ) -> StoreResult<()>;
    async fn add_data_type_node(&self, mode: TargetMode, req: AddNodeRequest) -> StoreResult<()>;
    async fn delete_node(
        &self,
        mode: TargetMode,
        node_id: NodeId,
        delete_references: bool,
    ) -> StoreResult<()>;
    #[allow(clippy::too_many_arguments)]
    async fn delete_reference(
        &self,
        mode: TargetMode,
        source_id: NodeId,
        reference_type_id: NodeId,
        target_id: ExpandedNodeId,
        is_forward: bool,
        delete_bidirectional: bool,
    ) -> StoreResult<()>;

    // ===== attribute reads =====
    async fn read_node_id(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<NodeId>;
    async fn read_node_class(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<NodeClass>;
    async fn read_browse_name(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<QualifiedName>;
    async fn read_display_name(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<LocalizedText>;
    async fn read_description(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<LocalizedText>;
    async fn read_write_mask(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<u32>;
    async fn read_is_abstract(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<bool>;
    async fn read_symmetric(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<bool>;
    async fn read_inverse_name(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<LocalizedText>;
    async fn read_contains_no_loops(&self, mode: TargetMode, node_id: &NodeId)
        -> StoreResult<bool>;
    async fn read_event_notifier(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<u8>;
    async fn read_value_rank(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<i32>;
    async fn read_array_dimensions(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<Vec<u32>>;
    async fn read_access_level(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<u8>;
    async fn read_minimum_sampling_interval(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
    ) -> StoreResult<f64>;
    async fn read_historizing(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<bool>;
    async fn read_executable(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<bool>;
    async fn read_data_type(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<NodeId>;
    async fn read_value(&self, mode: TargetMode, node_id: &NodeId) -> StoreResult<Variant>;

    // ===== attribute writes =====
    async fn write_browse_name(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: QualifiedName,
    ) -> StoreResult<()>;
    async fn write_display_name(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: LocalizedText,
    ) -> StoreResult<()>;
    async fn write_description(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: LocalizedText,
    ) -> StoreResult<()>;
    async fn write_write_mask(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: u32,
    ) -> StoreResult<()>;
    async fn write_is_abstract(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: bool,
    ) -> StoreResult<()>;
    async fn write_inverse_name(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: LocalizedText,
    ) -> StoreResult<()>;
    async fn write_data_type(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: NodeId,
    ) -> StoreResult<()>;
    async fn write_value_rank(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: i32,
    ) -> StoreResult<()>;
    async fn write_array_dimensions(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: Vec<u32>,
    ) -> StoreResult<()>;
    async fn write_access_level(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: u8,
    ) -> StoreResult<()>;
    async fn write_minimum_sampling_interval(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: f64,
    ) -> StoreResult<()>;
    async fn write_historizing(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: bool,
    ) -> StoreResult<()>;
    async fn write_executable(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: bool,
    ) -> StoreResult<()>;
    async fn write_event_notifier(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: u8,
    ) -> StoreResult<()>;
    /// Write the value attribute. Local-mode writes may trigger a
    /// [`StoreEvent::ValueWritten`] echo that the caller is expected to
    /// suppress for writes it issued itself.
    async fn write_value(
        &self,
        mode: TargetMode,
        node_id: &NodeId,
        value: Variant,
    ) -> StoreResult<()>;

    // ===== subscriptions =====
    async fn create_subscription(
        &self,
        mode: TargetMode,
        publishing_interval_ms: f64,
    ) -> StoreResult<u32>;
    async fn delete_subscription(&self, mode: TargetMode, subscription_id: u32) -> StoreResult<()>;
    async fn create_monitored_item(
        &self,
        mode: TargetMode,
        subscription_id: u32,
        node_id: NodeId,
        sampling_interval_ms: f64,
    ) -> StoreResult<u32>;
    async fn delete_monitored_item(
        &self,
        mode: TargetMode,
        subscription_id: u32,
        monitored_item_id: u32,
    ) -> StoreResult<()>;
}
