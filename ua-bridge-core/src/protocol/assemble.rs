//! Decoding of identifier terms from inbound requests.
//!
//! Identifiers arrive as a 4-way discriminated union; an unknown
//! discriminant or a malformed payload shape is a wire-contract violation,
//! not an application error.

use crate::protocol::error::{ProtocolError, Result};
use crate::protocol::term::TermReader;
use ua_bridge_sdk::{ExpandedNodeId, Guid, LocalizedText, NodeId, NodeIdPayload, QualifiedName};

/// `{node_type, ns_index, identifier}`
pub fn node_id(r: &mut TermReader) -> Result<NodeId> {
    r.expect_tuple("node_id", 3)?;

    let node_type = r.read_u64("node_type")?;
    let namespace = r.read_u16("ns_index")?;

    let payload = match node_type {
        0 => NodeIdPayload::Numeric(r.read_u32("numeric identifier")?),
        1 => NodeIdPayload::String(r.read_binary_string("string identifier")?),
        2 => NodeIdPayload::Guid(guid(r)?),
        3 => NodeIdPayload::ByteString(r.read_binary("bytestring identifier")?),
        value => {
            return Err(ProtocolError::UnknownDiscriminant {
                context: "node_id",
                value,
            })
        }
    };

    Ok(NodeId { namespace, payload })
}

/// Expanded identifiers share the plain identifier wire shape on the decode
/// path; the namespace URI and server index only appear on encode.
pub fn expanded_node_id(r: &mut TermReader) -> Result<ExpandedNodeId> {
    Ok(ExpandedNodeId::from(node_id(r)?))
}

/// `{data1, data2, data3, data4}` with an up-to-8-byte opaque tail.
pub fn guid(r: &mut TermReader) -> Result<Guid> {
    r.expect_tuple("guid", 4)?;
    let data1 = r.read_u32("guid data1")?;
    let data2 = r.read_u16("guid data2")?;
    let data3 = r.read_u16("guid data3")?;

    let tail = r.read_binary("guid data4")?;
    if tail.len() > 8 {
        return Err(ProtocolError::IntegerRange {
            target: "guid data4",
        });
    }
    let mut data4 = [0u8; 8];
    data4[..tail.len()].copy_from_slice(&tail);

    Ok(Guid {
        data1,
        data2,
        data3,
        data4,
    })
}

/// `{ns_index, name}`
pub fn qualified_name(r: &mut TermReader) -> Result<QualifiedName> {
    r.expect_tuple("qualified_name", 2)?;
    let namespace_index = r.read_u16("ns_index")?;
    let name = r.read_binary_string("qualified name")?;
    Ok(QualifiedName {
        namespace_index,
        name,
    })
}

/// `{locale, text}`
pub fn localized_text(r: &mut TermReader) -> Result<LocalizedText> {
    r.expect_tuple("localized_text", 2)?;
    let locale = r.read_binary_string("locale")?;
    let text = r.read_binary_string("text")?;
    Ok(LocalizedText { locale, text })
}
