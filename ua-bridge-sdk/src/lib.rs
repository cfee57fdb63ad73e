mod discovery;
mod error;
mod status;
mod store;
mod types;
mod value;

pub use discovery::{
    ApplicationDescription, ApplicationType, ClientConfig, EndpointDescription,
    MessageSecurityMode, ServerConfig, ServerOnNetwork,
};
pub use error::{StoreError, StoreResult};
pub use status::StatusCode;
pub use store::{AddNodeRequest, NodeStore, StoreEvent, StoreEventSender};
pub use types::{
    ExpandedNodeId, Guid, LocalizedText, NodeClass, NodeId, NodeIdPayload, QualifiedName,
    SemanticChange, TargetMode, XvType,
};
pub use value::{Scalar, ValueKind, Variant};
