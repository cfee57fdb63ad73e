//! Outbound message bodies.
//!
//! Replies echo the command atom and the caller metadata captured from the
//! request; events carry no caller token and start with their event atom.

use crate::protocol::encode::{self, ResponseData};
use crate::protocol::error::ErrorReason;
use crate::protocol::term::TermWriter;
use bytes::Bytes;
use ua_bridge_sdk::{NodeId, Variant};

/// First body byte of every outbound message.
pub const RESPONSE_ID: u8 = b'r';

/// Request identity echoed verbatim into every reply.
///
/// The metadata slice is the raw encoded term captured from the request; it
/// is never inspected, only spliced back.
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub command: String,
    pub metadata: Bytes,
}

fn body(build: impl FnOnce(&mut TermWriter)) -> Bytes {
    let mut w = TermWriter::new();
    w.raw(&[RESPONSE_ID]);
    w.version();
    build(&mut w);
    w.into_bytes()
}

fn reply(ctx: &CallerContext, result: impl FnOnce(&mut TermWriter)) -> Bytes {
    body(|w| {
        w.tuple_header(3);
        w.atom(&ctx.command);
        w.raw(&ctx.metadata);
        result(w);
    })
}

/// `{cmd, metadata, :ok}`
pub fn ok(ctx: &CallerContext) -> Bytes {
    reply(ctx, |w| {
        w.atom("ok");
    })
}

/// `{cmd, metadata, {:ok, data}}`
pub fn ok_data(ctx: &CallerContext, data: &ResponseData) -> Bytes {
    reply(ctx, |w| {
        w.tuple_header(2);
        w.atom("ok");
        encode::response_data(w, data);
    })
}

/// `{cmd, metadata, {:error, reason}}` where the reason is a short atom for
/// input problems and the status mnemonic binary for store failures.
pub fn error(ctx: &CallerContext, reason: ErrorReason) -> Bytes {
    reply(ctx, |w| {
        w.tuple_header(2);
        w.atom("error");
        match reason {
            ErrorReason::Status(code) => {
                encode::status_code(w, code);
            }
            other => {
                // atom() is total for the non-status reasons
                if let Some(name) = other.atom() {
                    w.atom(name);
                }
            }
        }
    })
}

/// `{:write, node_id, value}`
pub fn write_event(node_id: &NodeId, value: &Variant) -> Bytes {
    body(|w| {
        w.tuple_header(3);
        w.atom("write");
        encode::node_id(w, node_id);
        encode::variant(w, value);
    })
}

/// `{:subscription, {:timeout, sub_id}}`
pub fn subscription_timeout(subscription_id: u32) -> Bytes {
    subscription_event(|w| {
        w.tuple_header(2);
        w.atom("timeout");
        w.u64(u64::from(subscription_id));
    })
}

/// `{:subscription, {:delete, sub_id}}`
pub fn subscription_deleted(subscription_id: u32) -> Bytes {
    subscription_event(|w| {
        w.tuple_header(2);
        w.atom("delete");
        w.u64(u64::from(subscription_id));
    })
}

/// `{:subscription, {:delete, sub_id, mon_id}}`
pub fn monitored_item_deleted(subscription_id: u32, monitored_item_id: u32) -> Bytes {
    subscription_event(|w| {
        w.tuple_header(3);
        w.atom("delete");
        w.u64(u64::from(subscription_id));
        w.u64(u64::from(monitored_item_id));
    })
}

/// `{:subscription, {:data, sub_id, mon_id, value}}`
pub fn monitored_item_data(
    subscription_id: u32,
    monitored_item_id: u32,
    value: &Variant,
) -> Bytes {
    subscription_event(|w| {
        w.tuple_header(4);
        w.atom("data");
        w.u64(u64::from(subscription_id));
        w.u64(u64::from(monitored_item_id));
        encode::variant(w, value);
    })
}

fn subscription_event(inner: impl FnOnce(&mut TermWriter)) -> Bytes {
    body(|w| {
        w.tuple_header(2);
        w.atom("subscription");
        inner(w);
    })
}
