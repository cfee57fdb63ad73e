use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Discriminated identifier payload of a node address.
///
/// Exactly one variant is active; the namespace index lives on [`NodeId`]
/// regardless of the variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeIdPayload {
    Numeric(u32),
    String(String),
    Guid(Guid),
    ByteString(Bytes),
}

impl NodeIdPayload {
    /// Wire discriminant used when a node id is decoded from a request.
    #[inline]
    pub const fn discriminant(&self) -> u8 {
        match self {
            NodeIdPayload::Numeric(_) => 0,
            NodeIdPayload::String(_) => 1,
            NodeIdPayload::Guid(_) => 2,
            NodeIdPayload::ByteString(_) => 3,
        }
    }

    /// Stable type tag emitted when a node id is encoded into a response.
    #[inline]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            NodeIdPayload::Numeric(_) => "integer",
            NodeIdPayload::String(_) => "string",
            NodeIdPayload::Guid(_) => "guid",
            NodeIdPayload::ByteString(_) => "bytestring",
        }
    }
}

/// Address of a node in the information model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub namespace: u16,
    pub payload: NodeIdPayload,
}

impl NodeId {
    #[inline]
    pub fn numeric(namespace: u16, value: u32) -> Self {
        Self {
            namespace,
            payload: NodeIdPayload::Numeric(value),
        }
    }

    #[inline]
    pub fn string(namespace: u16, value: impl Into<String>) -> Self {
        Self {
            namespace,
            payload: NodeIdPayload::String(value.into()),
        }
    }

    #[inline]
    pub fn guid(namespace: u16, value: Guid) -> Self {
        Self {
            namespace,
            payload: NodeIdPayload::Guid(value),
        }
    }

    #[inline]
    pub fn byte_string(namespace: u16, value: impl Into<Bytes>) -> Self {
        Self {
            namespace,
            payload: NodeIdPayload::ByteString(value.into()),
        }
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.payload {
            NodeIdPayload::Numeric(v) => write!(f, "ns={};i={}", self.namespace, v),
            NodeIdPayload::String(v) => write!(f, "ns={};s={}", self.namespace, v),
            NodeIdPayload::Guid(v) => write!(f, "ns={};g={}", self.namespace, v),
            NodeIdPayload::ByteString(v) => write!(f, "ns={};b={} bytes", self.namespace, v.len()),
        }
    }
}

/// A [`NodeId`] augmented with an optional namespace URI and a server index
/// for cross-server references. A non-empty URI augments the namespace index,
/// it does not replace it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedNodeId {
    pub node_id: NodeId,
    pub namespace_uri: String,
    pub server_index: u32,
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: String::new(),
            server_index: 0,
        }
    }
}

/// Fixed-size globally unique identifier (three integer fields plus an
/// 8-byte opaque tail).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Display for Guid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1,
            self.data2,
            self.data3,
            self.data4[0],
            self.data4[1],
            self.data4[2],
            self.data4[3],
            self.data4[4],
            self.data4[5],
            self.data4[6],
            self.data4[7]
        )
    }
}

/// Namespace-qualified browse name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QualifiedName {
    pub namespace_index: u16,
    pub name: String,
}

impl QualifiedName {
    #[inline]
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }
}

/// A (locale, text) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocalizedText {
    pub locale: String,
    pub text: String,
}

impl LocalizedText {
    #[inline]
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            text: text.into(),
        }
    }
}

/// "affected / affectedType" composite carried by model-change events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticChange {
    pub affected: NodeId,
    pub affected_type: NodeId,
}

/// An (x, value) sample pair where the value is single precision.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XvType {
    pub value: f32,
    pub x: f64,
}

/// Node class bit values as defined by the information model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u32)]
pub enum NodeClass {
    Unspecified = 0,
    Object = 1,
    Variable = 2,
    Method = 4,
    ObjectType = 8,
    VariableType = 16,
    ReferenceType = 32,
    DataType = 64,
    View = 128,
}

impl NodeClass {
    /// Stable textual name surfaced to callers reading the node class.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeClass::Unspecified => "Unspecified",
            NodeClass::Object => "Object",
            NodeClass::Variable => "Variable",
            NodeClass::Method => "Method",
            NodeClass::ObjectType => "ObjectType",
            NodeClass::VariableType => "VariableType",
            NodeClass::ReferenceType => "ReferenceType",
            NodeClass::DataType => "DataType",
            NodeClass::View => "View",
        }
    }
}

impl Display for NodeClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selects which backend family a store operation targets. Both expose the
/// same operation set with identical semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetMode {
    /// In-process address space.
    #[default]
    Local,
    /// Remote-connection-backed address space.
    Remote,
}
