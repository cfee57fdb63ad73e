//! Protocol engine bridging an Erlang-term host runtime to a node store.
//!
//! The crate splits into three layers: `protocol` owns the wire format
//! (term codec, framing, envelopes), `dispatch` owns the command handlers,
//! and `session` drives one framed connection end to end.

pub mod dispatch;
pub mod echo;
pub mod protocol;
pub mod session;

pub use dispatch::{Command, Dispatcher};
pub use echo::EchoGuard;
pub use protocol::{ErrorReason, FrameCodec, ProtocolError};
pub use session::{serve, Session};
