use crate::types::{ExpandedNodeId, Guid, LocalizedText, NodeId, QualifiedName, SemanticChange, XvType};
use crate::StatusCode;
use bytes::Bytes;

/// Closed set of scalar kinds carried by a [`Variant`].
///
/// The discriminants are the wire `data_type` codes callers pass with typed
/// reads, value writes and blank-array creation. They are part of the
/// protocol contract and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueKind {
    Boolean = 0,
    SByte = 1,
    Byte = 2,
    Int16 = 3,
    UInt16 = 4,
    Int32 = 5,
    UInt32 = 6,
    Int64 = 7,
    UInt64 = 8,
    Float = 9,
    Double = 10,
    String = 11,
    DateTime = 12,
    Guid = 13,
    ByteString = 14,
    XmlElement = 15,
    NodeId = 16,
    ExpandedNodeId = 17,
    StatusCode = 18,
    QualifiedName = 19,
    LocalizedText = 20,
    SemanticChange = 21,
    TimeString = 22,
    UadpContentMask = 23,
    XvType = 24,
    ElementOperand = 25,
}

impl ValueKind {
    /// Resolve a wire `data_type` code. Unknown codes are left to the caller
    /// to classify (fatal for writes, "eagain" for trusted reads).
    pub const fn from_code(code: u64) -> Option<Self> {
        Some(match code {
            0 => ValueKind::Boolean,
            1 => ValueKind::SByte,
            2 => ValueKind::Byte,
            3 => ValueKind::Int16,
            4 => ValueKind::UInt16,
            5 => ValueKind::Int32,
            6 => ValueKind::UInt32,
            7 => ValueKind::Int64,
            8 => ValueKind::UInt64,
            9 => ValueKind::Float,
            10 => ValueKind::Double,
            11 => ValueKind::String,
            12 => ValueKind::DateTime,
            13 => ValueKind::Guid,
            14 => ValueKind::ByteString,
            15 => ValueKind::XmlElement,
            16 => ValueKind::NodeId,
            17 => ValueKind::ExpandedNodeId,
            18 => ValueKind::StatusCode,
            19 => ValueKind::QualifiedName,
            20 => ValueKind::LocalizedText,
            21 => ValueKind::SemanticChange,
            22 => ValueKind::TimeString,
            23 => ValueKind::UadpContentMask,
            24 => ValueKind::XvType,
            25 => ValueKind::ElementOperand,
            _ => return None,
        })
    }

    /// Zero-value constructor used when building a blank array prior to a
    /// partial write. Every element starts from this value.
    pub fn zero(&self) -> Scalar {
        match self {
            ValueKind::Boolean => Scalar::Boolean(false),
            ValueKind::SByte => Scalar::SByte(0),
            ValueKind::Byte => Scalar::Byte(0),
            ValueKind::Int16 => Scalar::Int16(0),
            ValueKind::UInt16 => Scalar::UInt16(0),
            ValueKind::Int32 => Scalar::Int32(0),
            ValueKind::UInt32 => Scalar::UInt32(0),
            ValueKind::Int64 => Scalar::Int64(0),
            ValueKind::UInt64 => Scalar::UInt64(0),
            ValueKind::Float => Scalar::Float(0.0),
            ValueKind::Double => Scalar::Double(0.0),
            ValueKind::String => Scalar::String(String::new()),
            ValueKind::DateTime => Scalar::DateTime(0),
            ValueKind::Guid => Scalar::Guid(Guid::default()),
            ValueKind::ByteString => Scalar::ByteString(Bytes::new()),
            ValueKind::XmlElement => Scalar::XmlElement(String::new()),
            ValueKind::NodeId => Scalar::NodeId(NodeId::numeric(0, 0)),
            ValueKind::ExpandedNodeId => {
                Scalar::ExpandedNodeId(ExpandedNodeId::from(NodeId::numeric(0, 0)))
            }
            ValueKind::StatusCode => Scalar::StatusCode(StatusCode::GOOD),
            ValueKind::QualifiedName => Scalar::QualifiedName(QualifiedName::default()),
            ValueKind::LocalizedText => Scalar::LocalizedText(LocalizedText::default()),
            ValueKind::SemanticChange => Scalar::SemanticChange(SemanticChange {
                affected: NodeId::numeric(0, 0),
                affected_type: NodeId::numeric(0, 0),
            }),
            ValueKind::TimeString => Scalar::TimeString(String::new()),
            ValueKind::UadpContentMask => Scalar::UadpContentMask(0),
            ValueKind::XvType => Scalar::XvType(XvType::default()),
            ValueKind::ElementOperand => Scalar::ElementOperand(0),
        }
    }
}

/// One element of an attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    /// 100 ns ticks since 1601-01-01, as used by the address-space backend.
    DateTime(i64),
    Guid(Guid),
    ByteString(Bytes),
    XmlElement(String),
    NodeId(NodeId),
    ExpandedNodeId(ExpandedNodeId),
    StatusCode(StatusCode),
    QualifiedName(QualifiedName),
    LocalizedText(LocalizedText),
    SemanticChange(SemanticChange),
    TimeString(String),
    UadpContentMask(u32),
    XvType(XvType),
    ElementOperand(u32),
}

impl Scalar {
    /// Return the corresponding [`ValueKind`] for this element.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Scalar::Boolean(_) => ValueKind::Boolean,
            Scalar::SByte(_) => ValueKind::SByte,
            Scalar::Byte(_) => ValueKind::Byte,
            Scalar::Int16(_) => ValueKind::Int16,
            Scalar::UInt16(_) => ValueKind::UInt16,
            Scalar::Int32(_) => ValueKind::Int32,
            Scalar::UInt32(_) => ValueKind::UInt32,
            Scalar::Int64(_) => ValueKind::Int64,
            Scalar::UInt64(_) => ValueKind::UInt64,
            Scalar::Float(_) => ValueKind::Float,
            Scalar::Double(_) => ValueKind::Double,
            Scalar::String(_) => ValueKind::String,
            Scalar::DateTime(_) => ValueKind::DateTime,
            Scalar::Guid(_) => ValueKind::Guid,
            Scalar::ByteString(_) => ValueKind::ByteString,
            Scalar::XmlElement(_) => ValueKind::XmlElement,
            Scalar::NodeId(_) => ValueKind::NodeId,
            Scalar::ExpandedNodeId(_) => ValueKind::ExpandedNodeId,
            Scalar::StatusCode(_) => ValueKind::StatusCode,
            Scalar::QualifiedName(_) => ValueKind::QualifiedName,
            Scalar::LocalizedText(_) => ValueKind::LocalizedText,
            Scalar::SemanticChange(_) => ValueKind::SemanticChange,
            Scalar::TimeString(_) => ValueKind::TimeString,
            Scalar::UadpContentMask(_) => ValueKind::UadpContentMask,
            Scalar::XvType(_) => ValueKind::XvType,
            Scalar::ElementOperand(_) => ValueKind::ElementOperand,
        }
    }
}

/// Polymorphic attribute value: empty, a single scalar, or a homogeneous
/// array with optional multi-dimensional metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variant {
    #[default]
    Empty,
    Scalar(Scalar),
    Array {
        kind: ValueKind,
        items: Vec<Scalar>,
        dimensions: Vec<u32>,
    },
}

impl Variant {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Variant::Scalar(_))
    }

    /// Kind of the contained elements; empty variants have no kind.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Variant::Empty => None,
            Variant::Scalar(s) => Some(s.kind()),
            Variant::Array { kind, .. } => Some(*kind),
        }
    }

    /// Number of array elements; scalar and empty variants report zero.
    pub fn array_len(&self) -> usize {
        match self {
            Variant::Array { items, .. } => items.len(),
            _ => 0,
        }
    }

    /// Build a blank array of `len` zero-valued elements of `kind`.
    pub fn blank_array(kind: ValueKind, len: usize, dimensions: Vec<u32>) -> Self {
        Variant::Array {
            kind,
            items: vec![kind.zero(); len],
            dimensions,
        }
    }

    /// Element at `index` for arrays; scalars yield their single element for
    /// any requested index.
    pub fn element(&self, index: usize) -> Option<&Scalar> {
        match self {
            Variant::Empty => None,
            Variant::Scalar(s) => Some(s),
            Variant::Array { items, .. } => items.get(index),
        }
    }
}

impl From<Scalar> for Variant {
    fn from(scalar: Scalar) -> Self {
        Variant::Scalar(scalar)
    }
}
