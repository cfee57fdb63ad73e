//! Encoding of domain values into response terms.
//!
//! Every structured type has one self-describing shape; the variant encoder
//! bridges the scalar/array/empty trichotomy on top of the per-kind rules.

use crate::protocol::term::TermWriter;
use bytes::Bytes;
use ua_bridge_sdk::{
    ApplicationDescription, ClientConfig, EndpointDescription, ExpandedNodeId, Guid,
    LocalizedText, NodeId, NodeIdPayload, QualifiedName, Scalar, SemanticChange, ServerConfig,
    ServerOnNetwork, StatusCode, Variant, XvType,
};

/// `{ns_index, node_id_type, identifier}`
pub fn node_id(w: &mut TermWriter, id: &NodeId) {
    w.tuple_header(3);
    w.u64(u64::from(id.namespace));
    node_id_payload(w, id);
}

fn node_id_payload(w: &mut TermWriter, id: &NodeId) {
    w.binary(id.payload.type_tag().as_bytes());
    match &id.payload {
        NodeIdPayload::Numeric(v) => {
            w.u64(u64::from(*v));
        }
        NodeIdPayload::String(v) => {
            w.binary(v.as_bytes());
        }
        NodeIdPayload::Guid(v) => guid(w, v),
        NodeIdPayload::ByteString(v) => {
            w.binary(v);
        }
    }
}

/// `{ns_index, node_id_type, identifier, namespace_uri, server_index}`
pub fn expanded_node_id(w: &mut TermWriter, id: &ExpandedNodeId) {
    w.tuple_header(5);
    w.u64(u64::from(id.node_id.namespace));
    node_id_payload(w, &id.node_id);
    w.binary(id.namespace_uri.as_bytes());
    w.u64(u64::from(id.server_index));
}

/// `{data1, data2, data3, data4}`
pub fn guid(w: &mut TermWriter, g: &Guid) {
    w.tuple_header(4);
    w.u64(u64::from(g.data1));
    w.u64(u64::from(g.data2));
    w.u64(u64::from(g.data3));
    w.binary(&g.data4);
}

/// `{ns_index, name}`
pub fn qualified_name(w: &mut TermWriter, q: &QualifiedName) {
    w.tuple_header(2);
    w.u64(u64::from(q.namespace_index));
    w.binary(q.name.as_bytes());
}

/// `{locale, text}`
pub fn localized_text(w: &mut TermWriter, t: &LocalizedText) {
    w.tuple_header(2);
    w.binary(t.locale.as_bytes());
    w.binary(t.text.as_bytes());
}

/// The textual mnemonic, never the raw numeric code.
pub fn status_code(w: &mut TermWriter, code: StatusCode) {
    w.binary(code.name().as_bytes());
}

/// `{affected, affected_type}`
pub fn semantic_change(w: &mut TermWriter, sc: &SemanticChange) {
    w.tuple_header(2);
    node_id(w, &sc.affected);
    node_id(w, &sc.affected_type);
}

/// `{value, x}` with the single-precision member widened to double.
pub fn xv_type(w: &mut TermWriter, xv: &XvType) {
    w.tuple_header(2);
    w.f64(f64::from(xv.value));
    w.f64(xv.x);
}

/// Flat unsigned sequence with the empty/non-empty list asymmetry.
pub fn array_dimensions(w: &mut TermWriter, dims: &[u32]) {
    w.list_header(dims.len());
    for d in dims {
        w.u64(u64::from(*d));
    }
    if !dims.is_empty() {
        w.nil();
    }
}

/// Binary string sequence with the same list asymmetry.
fn string_list(w: &mut TermWriter, items: &[String]) {
    w.list_header(items.len());
    for item in items {
        w.binary(item.as_bytes());
    }
    if !items.is_empty() {
        w.nil();
    }
}

fn key(w: &mut TermWriter, name: &str) {
    w.binary(name.as_bytes());
}

/// Map of the three client timeouts, all in milliseconds.
pub fn client_config(w: &mut TermWriter, cfg: &ClientConfig) {
    w.map_header(3);
    key(w, "timeout");
    w.u64(u64::from(cfg.timeout));
    key(w, "secureChannelLifeTime");
    w.u64(u64::from(cfg.secure_channel_lifetime));
    key(w, "requestedSessionTimeout");
    w.u64(u64::from(cfg.requested_session_timeout));
}

/// List of network-discovery records, each a 4-key map.
pub fn servers_on_network(w: &mut TermWriter, servers: &[ServerOnNetwork]) {
    w.list_header(servers.len());
    for server in servers {
        w.map_header(4);
        key(w, "server_name");
        w.binary(server.server_name.as_bytes());
        key(w, "record_id");
        w.u64(u64::from(server.record_id));
        key(w, "discovery_url");
        w.binary(server.discovery_url.as_bytes());
        key(w, "capabilities");
        string_list(w, &server.capabilities);
    }
    if !servers.is_empty() {
        w.nil();
    }
}

/// List of application-description records, each a 6-key map. The `server`
/// key repeats the application URI, matching what callers already consume.
pub fn application_descriptions(w: &mut TermWriter, descriptions: &[ApplicationDescription]) {
    w.list_header(descriptions.len());
    for description in descriptions {
        w.map_header(6);
        key(w, "server");
        w.binary(description.application_uri.as_bytes());
        key(w, "name");
        w.binary(description.name.as_bytes());
        key(w, "application_uri");
        w.binary(description.application_uri.as_bytes());
        key(w, "product_uri");
        w.binary(description.product_uri.as_bytes());
        key(w, "type");
        w.binary(description.application_type.as_str().as_bytes());
        key(w, "discovery_url");
        string_list(w, &description.discovery_urls);
    }
    if !descriptions.is_empty() {
        w.nil();
    }
}

/// List of endpoint records, each a 5-key map.
pub fn endpoint_descriptions(w: &mut TermWriter, endpoints: &[EndpointDescription]) {
    w.list_header(endpoints.len());
    for endpoint in endpoints {
        w.map_header(5);
        key(w, "endpoint_url");
        w.binary(endpoint.endpoint_url.as_bytes());
        key(w, "transport_profile_uri");
        w.binary(endpoint.transport_profile_uri.as_bytes());
        key(w, "security_mode");
        w.binary(endpoint.security_mode.as_str().as_bytes());
        key(w, "security_profile_uri");
        w.binary(endpoint.security_policy_uri.as_bytes());
        key(w, "security_level");
        w.u64(u64::from(endpoint.security_level));
    }
    if !endpoints.is_empty() {
        w.nil();
    }
}

/// Server runtime snapshot; an unset hostname reads back as `localhost` and
/// the application description is a one-element list.
pub fn server_config(w: &mut TermWriter, cfg: &ServerConfig) {
    w.map_header(4);
    key(w, "n_threads");
    w.u64(u64::from(cfg.n_threads));
    key(w, "hostname");
    if cfg.hostname.is_empty() {
        w.binary(b"localhost");
    } else {
        w.binary(cfg.hostname.as_bytes());
    }
    key(w, "endpoint_description");
    endpoint_descriptions(w, &cfg.endpoints);
    key(w, "application_description");
    application_descriptions(w, std::slice::from_ref(&cfg.application_description));
}

/// One element in its self-describing per-kind shape.
pub fn scalar(w: &mut TermWriter, s: &Scalar) {
    match s {
        Scalar::Boolean(v) => {
            w.boolean(*v);
        }
        Scalar::SByte(v) => {
            w.i64(i64::from(*v));
        }
        Scalar::Byte(v) => {
            w.u64(u64::from(*v));
        }
        Scalar::Int16(v) => {
            w.i64(i64::from(*v));
        }
        Scalar::UInt16(v) => {
            w.u64(u64::from(*v));
        }
        Scalar::Int32(v) => {
            w.i64(i64::from(*v));
        }
        Scalar::UInt32(v) => {
            w.u64(u64::from(*v));
        }
        Scalar::Int64(v) => {
            w.i64(*v);
        }
        Scalar::UInt64(v) => {
            w.u64(*v);
        }
        // single source of numeric truth on the wire is double
        Scalar::Float(v) => {
            w.f64(f64::from(*v));
        }
        Scalar::Double(v) => {
            w.f64(*v);
        }
        Scalar::String(v) => {
            w.binary(v.as_bytes());
        }
        Scalar::DateTime(v) => {
            w.i64(*v);
        }
        Scalar::Guid(v) => guid(w, v),
        Scalar::ByteString(v) => {
            w.binary(v);
        }
        Scalar::XmlElement(v) => {
            w.binary(v.as_bytes());
        }
        Scalar::NodeId(v) => node_id(w, v),
        Scalar::ExpandedNodeId(v) => expanded_node_id(w, v),
        Scalar::StatusCode(v) => status_code(w, *v),
        Scalar::QualifiedName(v) => qualified_name(w, v),
        Scalar::LocalizedText(v) => localized_text(w, v),
        Scalar::SemanticChange(v) => semantic_change(w, v),
        Scalar::TimeString(v) => {
            w.binary(v.as_bytes());
        }
        Scalar::UadpContentMask(v) => {
            w.u64(u64::from(*v));
        }
        Scalar::XvType(v) => xv_type(w, v),
        Scalar::ElementOperand(v) => {
            w.u64(u64::from(*v));
        }
    }
}

/// Whole-variant encoding: empty is the null marker, a scalar is its single
/// element and an array is the element sequence.
pub fn variant(w: &mut TermWriter, v: &Variant) {
    match v {
        Variant::Empty => {
            w.atom("nil");
        }
        Variant::Scalar(s) => scalar(w, s),
        Variant::Array { items, .. } => {
            w.list_header(items.len());
            for item in items {
                scalar(w, item);
            }
            if !items.is_empty() {
                w.nil();
            }
        }
    }
}

/// Typed payload of a successful data response.
///
/// This is the closed set of shapes a handler can put inside `{:ok, data}`,
/// replacing per-call-site integer format codes with one exhaustive match.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Boolean(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    /// Single precision, widened to double on the wire.
    Float(f32),
    Binary(Bytes),
    /// Charlist text; reserved for node-class names.
    CharList(&'static str),
    Atom(&'static str),
    NodeId(NodeId),
    ExpandedNodeId(ExpandedNodeId),
    Guid(Guid),
    QualifiedName(QualifiedName),
    LocalizedText(LocalizedText),
    Status(StatusCode),
    SemanticChange(SemanticChange),
    XvType(XvType),
    ArrayDimensions(Vec<u32>),
    Variant(Variant),
    ClientConfig(ClientConfig),
    ServersOnNetwork(Vec<ServerOnNetwork>),
    ApplicationDescriptions(Vec<ApplicationDescription>),
    EndpointDescriptions(Vec<EndpointDescription>),
    ServerConfig(ServerConfig),
}

pub fn response_data(w: &mut TermWriter, data: &ResponseData) {
    match data {
        ResponseData::Boolean(v) => {
            w.boolean(*v);
        }
        ResponseData::Int(v) => {
            w.i64(*v);
        }
        ResponseData::UInt(v) => {
            w.u64(*v);
        }
        ResponseData::Double(v) => {
            w.f64(*v);
        }
        ResponseData::Float(v) => {
            w.f64(f64::from(*v));
        }
        ResponseData::Binary(v) => {
            w.binary(v);
        }
        ResponseData::CharList(v) => {
            w.charlist(v);
        }
        ResponseData::Atom(v) => {
            w.atom(v);
        }
        ResponseData::NodeId(v) => node_id(w, v),
        ResponseData::ExpandedNodeId(v) => expanded_node_id(w, v),
        ResponseData::Guid(v) => guid(w, v),
        ResponseData::QualifiedName(v) => qualified_name(w, v),
        ResponseData::LocalizedText(v) => localized_text(w, v),
        ResponseData::Status(v) => status_code(w, *v),
        ResponseData::SemanticChange(v) => semantic_change(w, v),
        ResponseData::XvType(v) => xv_type(w, v),
        ResponseData::ArrayDimensions(v) => array_dimensions(w, v),
        ResponseData::Variant(v) => variant(w, v),
        ResponseData::ClientConfig(v) => client_config(w, v),
        ResponseData::ServersOnNetwork(v) => servers_on_network(w, v),
        ResponseData::ApplicationDescriptions(v) => application_descriptions(w, v),
        ResponseData::EndpointDescriptions(v) => endpoint_descriptions(w, v),
        ResponseData::ServerConfig(v) => server_config(w, v),
    }
}
