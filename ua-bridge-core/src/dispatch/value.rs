//! Value attribute commands.
//!
//! A value write never replaces an existing array wholesale: the current
//! value is inspected first, a null or scalar target is promoted to a scalar
//! of the incoming element, and an array target has exactly one slot
//! overwritten in place. Blank arrays exist to give such partial writes a
//! typed, zero-filled target.

use super::{invalid, Dispatcher, HandlerError, HandlerResult, Reply};
use crate::protocol::assemble;
use crate::protocol::error::ErrorReason;
use crate::protocol::term::TermReader;
use crate::protocol::{ProtocolError, ResponseData};
use ua_bridge_sdk::{NodeStore, Scalar, StatusCode, TargetMode, Variant, ValueKind, XvType};

impl<S: NodeStore> Dispatcher<S> {
    /// `{node_id, data_type, data_index, value}`
    pub(super) async fn write_value(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_value", 4)?;
        let node_id = assemble::node_id(r)?;
        let code = r.read_u64("data_type").map_err(invalid)?;
        let index = r.read_u64("data_index").map_err(invalid)? as usize;

        let kind = ValueKind::from_code(code).ok_or(ProtocolError::UnknownDiscriminant {
            context: "data_type",
            value: code,
        })?;

        let current = self.store.read_value(self.mode, &node_id).await?;
        let value = match current {
            Variant::Empty | Variant::Scalar(_) => {
                Variant::Scalar(decode_element(r, kind)?)
            }
            Variant::Array {
                kind: actual,
                mut items,
                dimensions,
            } => {
                if index >= items.len() {
                    return Err(ErrorReason::Status(StatusCode::BAD_TYPE_MISMATCH).into());
                }
                let element = decode_element(r, kind)?;
                if kind != actual {
                    return Err(ErrorReason::Status(StatusCode::BAD_TYPE_MISMATCH).into());
                }
                items[index] = element;
                Variant::Array {
                    kind: actual,
                    items,
                    dimensions,
                }
            }
        };

        self.write_value_marked(&node_id, value).await?;
        Ok(Reply::Ok)
    }

    /// `{node_id, data_type, dimension_count, total_length, dimensions_tuple}`
    pub(super) async fn write_blank_array(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_blank_array", 5)?;
        let node_id = assemble::node_id(r)?;
        let code = r.read_u64("data_type").map_err(invalid)?;
        let dimension_count = r.read_u32("dimension_count").map_err(invalid)? as usize;
        let total_length = r.read_u64("array_length").map_err(invalid)? as usize;

        let kind = ValueKind::from_code(code).ok_or(ProtocolError::UnknownDiscriminant {
            context: "data_type",
            value: code,
        })?;

        r.expect_tuple("array_dimensions", dimension_count)?;
        let mut dimensions = Vec::with_capacity(dimension_count);
        for _ in 0..dimension_count {
            dimensions.push(r.read_u32("array_dimension").map_err(invalid)?);
        }

        let value = Variant::blank_array(kind, total_length, dimensions);
        self.write_value_marked(&node_id, value).await?;
        Ok(Reply::Ok)
    }

    /// `{node_id, data_index}`; the index is accepted but unused since the
    /// whole variant is returned.
    pub(super) async fn read_value(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("read_node_value", 2)?;
        let node_id = assemble::node_id(r)?;
        let _ = r.read_u64("data_index").map_err(invalid)?;

        let value = self.store.read_value(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::Variant(value)))
    }

    /// `{node_id, data_index}` returning one element tagged by its runtime
    /// kind. A scalar answers any index; an out-of-range array index is the
    /// type-mismatch error.
    pub(super) async fn read_value_by_index(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("read_node_value_by_index", 2)?;
        let node_id = assemble::node_id(r)?;
        let index = r.read_u64("data_index").map_err(invalid)? as usize;

        let value = self.store.read_value(self.mode, &node_id).await?;
        if value.is_empty() {
            return Err(ErrorReason::Nil.into());
        }

        match value.element(index) {
            Some(element) => Ok(Reply::Data(ResponseData::Variant(Variant::Scalar(
                element.clone(),
            )))),
            None => Err(ErrorReason::Status(StatusCode::BAD_TYPE_MISMATCH).into()),
        }
    }

    /// `{node_id, data_type}` returning the first element, trusting the
    /// caller's kind. A kind the table does not know, or one that disagrees
    /// with the stored value, is `eagain`.
    pub(super) async fn read_value_by_data_type(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("read_node_value_by_data_type", 2)?;
        let node_id = assemble::node_id(r)?;
        let code = r.read_u64("data_type").map_err(invalid)?;

        let value = self.store.read_value(self.mode, &node_id).await?;
        if value.is_empty() {
            return Err(ErrorReason::Nil.into());
        }

        let requested = ValueKind::from_code(code).ok_or(ErrorReason::Eagain)?;
        if value.kind() != Some(requested) {
            return Err(ErrorReason::Eagain.into());
        }

        match value.element(0) {
            Some(element) => Ok(Reply::Data(ResponseData::Variant(Variant::Scalar(
                element.clone(),
            )))),
            None => Err(ErrorReason::Eagain.into()),
        }
    }

    /// Local writes are marked in the echo table before the store call so
    /// the resulting value-changed event is swallowed, not forwarded.
    async fn write_value_marked(
        &self,
        node_id: &ua_bridge_sdk::NodeId,
        value: Variant,
    ) -> Result<(), HandlerError> {
        if self.mode == TargetMode::Local {
            self.echo.mark(node_id);
        }
        self.store.write_value(self.mode, node_id, value).await?;
        Ok(())
    }
}

/// Decode one element of the given kind.
///
/// Primitive payloads are user data and degrade to `einval`; structured
/// payloads follow the identifier assembler's fatal semantics.
fn decode_element(r: &mut TermReader, kind: ValueKind) -> Result<Scalar, HandlerError> {
    let element = match kind {
        ValueKind::Boolean => Scalar::Boolean(r.read_bool("boolean value").map_err(invalid)?),
        ValueKind::SByte => {
            let v = r.read_i64("sbyte value").map_err(invalid)?;
            Scalar::SByte(i8::try_from(v).map_err(|_| ErrorReason::Einval)?)
        }
        ValueKind::Byte => {
            let v = r.read_u64("byte value").map_err(invalid)?;
            Scalar::Byte(u8::try_from(v).map_err(|_| ErrorReason::Einval)?)
        }
        ValueKind::Int16 => {
            let v = r.read_i64("int16 value").map_err(invalid)?;
            Scalar::Int16(i16::try_from(v).map_err(|_| ErrorReason::Einval)?)
        }
        ValueKind::UInt16 => {
            let v = r.read_u64("uint16 value").map_err(invalid)?;
            Scalar::UInt16(u16::try_from(v).map_err(|_| ErrorReason::Einval)?)
        }
        ValueKind::Int32 => {
            let v = r.read_i64("int32 value").map_err(invalid)?;
            Scalar::Int32(i32::try_from(v).map_err(|_| ErrorReason::Einval)?)
        }
        ValueKind::UInt32 => {
            let v = r.read_u64("uint32 value").map_err(invalid)?;
            Scalar::UInt32(u32::try_from(v).map_err(|_| ErrorReason::Einval)?)
        }
        ValueKind::Int64 => Scalar::Int64(r.read_i64("int64 value").map_err(invalid)?),
        ValueKind::UInt64 => Scalar::UInt64(r.read_u64("uint64 value").map_err(invalid)?),
        ValueKind::Float => Scalar::Float(r.read_f64("float value").map_err(invalid)? as f32),
        ValueKind::Double => Scalar::Double(r.read_f64("double value").map_err(invalid)?),
        ValueKind::String => Scalar::String(r.read_binary_string("string value")?),
        ValueKind::DateTime => Scalar::DateTime(r.read_i64("datetime value").map_err(invalid)?),
        ValueKind::Guid => Scalar::Guid(assemble::guid(r)?),
        ValueKind::ByteString => Scalar::ByteString(r.read_binary("bytestring value")?),
        ValueKind::XmlElement => Scalar::XmlElement(r.read_binary_string("xml value")?),
        ValueKind::NodeId => Scalar::NodeId(assemble::node_id(r)?),
        ValueKind::ExpandedNodeId => Scalar::ExpandedNodeId(assemble::expanded_node_id(r)?),
        ValueKind::StatusCode => {
            let v = r.read_u32("status code value").map_err(invalid)?;
            Scalar::StatusCode(StatusCode::from(v))
        }
        ValueKind::QualifiedName => Scalar::QualifiedName(assemble::qualified_name(r)?),
        ValueKind::LocalizedText => Scalar::LocalizedText(assemble::localized_text(r)?),
        ValueKind::SemanticChange => {
            r.expect_tuple("semantic_change", 2)?;
            let affected = assemble::node_id(r)?;
            let affected_type = assemble::node_id(r)?;
            Scalar::SemanticChange(ua_bridge_sdk::SemanticChange {
                affected,
                affected_type,
            })
        }
        ValueKind::TimeString => Scalar::TimeString(r.read_binary_string("time string value")?),
        ValueKind::UadpContentMask => {
            Scalar::UadpContentMask(r.read_u32("content mask value").map_err(invalid)?)
        }
        ValueKind::XvType => {
            r.expect_tuple("xv_type", 2)?;
            let value = r.read_f64("xv value").map_err(invalid)? as f32;
            let x = r.read_f64("xv x").map_err(invalid)?;
            Scalar::XvType(XvType { value, x })
        }
        ValueKind::ElementOperand => {
            Scalar::ElementOperand(r.read_u32("element operand value").map_err(invalid)?)
        }
    };
    Ok(element)
}
