//! Command registry and per-command handlers.
//!
//! Each handler validates the argument tuple shape, decodes its arguments,
//! invokes the node store and produces a reply. Shape violations abort the
//! session; bad user-supplied field values and store failures come back as
//! error replies on the open session.

mod attributes;
mod nodes;
mod subscriptions;
mod value;

use crate::echo::EchoGuard;
use crate::protocol::envelope::{self, CallerContext};
use crate::protocol::error::{ErrorReason, ProtocolError};
use crate::protocol::term::TermReader;
use crate::protocol::ResponseData;
use bytes::Bytes;
use std::sync::Arc;
use ua_bridge_sdk::{NodeStore, StatusCode, StoreError, TargetMode};

/// Successful handler outcome, before envelope wrapping.
pub(crate) enum Reply {
    Ok,
    Data(ResponseData),
}

/// Handler failure: either a session-fatal wire violation or an application
/// error that becomes an `{:error, reason}` reply.
pub(crate) enum HandlerError {
    Fatal(ProtocolError),
    App(ErrorReason),
}

impl From<ProtocolError> for HandlerError {
    fn from(e: ProtocolError) -> Self {
        HandlerError::Fatal(e)
    }
}

impl From<ErrorReason> for HandlerError {
    fn from(reason: ErrorReason) -> Self {
        HandlerError::App(reason)
    }
}

impl From<StoreError> for HandlerError {
    fn from(e: StoreError) -> Self {
        let status = match e {
            StoreError::Status(code) => code,
            StoreError::Unavailable(detail) => {
                tracing::warn!(%detail, "node store unavailable");
                StatusCode::BAD_INTERNAL_ERROR
            }
        };
        HandlerError::App(ErrorReason::Status(status))
    }
}

/// Downgrade a decode failure on a user-supplied field to `einval`.
pub(crate) fn invalid(_: ProtocolError) -> HandlerError {
    HandlerError::App(ErrorReason::Einval)
}

pub(crate) type HandlerResult = Result<Reply, HandlerError>;

macro_rules! commands {
    ($($variant:ident => $name:literal,)+) => {
        /// The closed set of inbound commands.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Command {
            $($variant,)+
        }

        impl Command {
            pub fn from_name(name: &str) -> Option<Command> {
                match name {
                    $($name => Some(Command::$variant),)+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Command::$variant => $name,)+
                }
            }
        }
    };
}

commands! {
    Test => "test",
    AddVariableNode => "add_variable_node",
    AddVariableTypeNode => "add_variable_type_node",
    AddObjectNode => "add_object_node",
    AddObjectTypeNode => "add_object_type_node",
    AddViewNode => "add_view_node",
    AddReferenceTypeNode => "add_reference_type_node",
    AddDataTypeNode => "add_data_type_node",
    DeleteNode => "delete_node",
    DeleteReference => "delete_reference",
    WriteNodeBrowseName => "write_node_browse_name",
    WriteNodeDisplayName => "write_node_display_name",
    WriteNodeDescription => "write_node_description",
    WriteNodeWriteMask => "write_node_write_mask",
    WriteNodeIsAbstract => "write_node_is_abstract",
    WriteNodeInverseName => "write_node_inverse_name",
    WriteNodeDataType => "write_node_data_type",
    WriteNodeValueRank => "write_node_value_rank",
    WriteNodeArrayDimensions => "write_node_array_dimensions",
    WriteNodeAccessLevel => "write_node_access_level",
    WriteNodeMinimumSamplingInterval => "write_node_minimum_sampling_interval",
    WriteNodeHistorizing => "write_node_historizing",
    WriteNodeExecutable => "write_node_executable",
    WriteNodeEventNotifier => "write_node_event_notifier",
    WriteNodeBlankArray => "write_node_blank_array",
    WriteNodeValue => "write_node_value",
    ReadNodeNodeId => "read_node_node_id",
    ReadNodeNodeClass => "read_node_node_class",
    ReadNodeBrowseName => "read_node_browse_name",
    ReadNodeDisplayName => "read_node_display_name",
    ReadNodeDescription => "read_node_description",
    ReadNodeWriteMask => "read_node_write_mask",
    ReadNodeIsAbstract => "read_node_is_abstract",
    ReadNodeSymmetric => "read_node_symmetric",
    ReadNodeInverseName => "read_node_inverse_name",
    ReadNodeContainsNoLoops => "read_node_contains_no_loops",
    ReadNodeEventNotifier => "read_node_event_notifier",
    ReadNodeValueRank => "read_node_value_rank",
    ReadNodeArrayDimensions => "read_node_array_dimensions",
    ReadNodeAccessLevel => "read_node_access_level",
    ReadNodeMinimumSamplingInterval => "read_node_minimum_sampling_interval",
    ReadNodeHistorizing => "read_node_historizing",
    ReadNodeExecutable => "read_node_executable",
    ReadNodeDataType => "read_node_data_type",
    ReadNodeValue => "read_node_value",
    ReadNodeValueByIndex => "read_node_value_by_index",
    ReadNodeValueByDataType => "read_node_value_by_data_type",
    SubscriptionCreate => "subscription_create",
    SubscriptionDelete => "subscription_delete",
    MonitoredItemCreate => "monitored_item_create",
    MonitoredItemDelete => "monitored_item_delete",
}

/// Decodes inbound request bodies, runs the handler and builds the reply
/// body. One dispatcher serves one session; commands run one at a time.
pub struct Dispatcher<S> {
    pub(crate) store: Arc<S>,
    pub(crate) echo: Arc<EchoGuard>,
    pub(crate) mode: TargetMode,
}

impl<S: NodeStore> Dispatcher<S> {
    pub fn new(store: Arc<S>, echo: Arc<EchoGuard>, mode: TargetMode) -> Self {
        Self { store, echo, mode }
    }

    /// Process one request body and return the reply body.
    ///
    /// An `Err` here is a wire-contract violation; the caller terminates the
    /// session without replying.
    pub async fn dispatch(&self, body: Bytes) -> Result<Bytes, ProtocolError> {
        let mut r = TermReader::new(body);
        r.expect_version()?;
        r.expect_tuple("request", 3)?;

        let name = r.read_atom("command")?;
        let command =
            Command::from_name(&name).ok_or_else(|| ProtocolError::UnknownCommand(name.clone()))?;
        let metadata = r.skip_term()?;
        let ctx = CallerContext {
            command: name,
            metadata,
        };

        match self.run(command, &mut r).await {
            Ok(Reply::Ok) => Ok(envelope::ok(&ctx)),
            Ok(Reply::Data(data)) => Ok(envelope::ok_data(&ctx, &data)),
            Err(HandlerError::App(reason)) => {
                tracing::debug!(command = ctx.command, ?reason, "command failed");
                Ok(envelope::error(&ctx, reason))
            }
            Err(HandlerError::Fatal(e)) => Err(e),
        }
    }

    async fn run(&self, command: Command, r: &mut TermReader) -> HandlerResult {
        match command {
            Command::Test => Ok(Reply::Ok),
            Command::AddVariableNode
            | Command::AddVariableTypeNode
            | Command::AddObjectNode
            | Command::AddObjectTypeNode
            | Command::AddViewNode
            | Command::AddReferenceTypeNode
            | Command::AddDataTypeNode => self.add_node(command, r).await,
            Command::DeleteNode => self.delete_node(r).await,
            Command::DeleteReference => self.delete_reference(r).await,
            Command::WriteNodeBrowseName => self.write_browse_name(r).await,
            Command::WriteNodeDisplayName => self.write_display_name(r).await,
            Command::WriteNodeDescription => self.write_description(r).await,
            Command::WriteNodeWriteMask => self.write_write_mask(r).await,
            Command::WriteNodeIsAbstract => self.write_is_abstract(r).await,
            Command::WriteNodeInverseName => self.write_inverse_name(r).await,
            Command::WriteNodeDataType => self.write_data_type(r).await,
            Command::WriteNodeValueRank => self.write_value_rank(r).await,
            Command::WriteNodeArrayDimensions => self.write_array_dimensions(r).await,
            Command::WriteNodeAccessLevel => self.write_access_level(r).await,
            Command::WriteNodeMinimumSamplingInterval => {
                self.write_minimum_sampling_interval(r).await
            }
            Command::WriteNodeHistorizing => self.write_historizing(r).await,
            Command::WriteNodeExecutable => self.write_executable(r).await,
            Command::WriteNodeEventNotifier => self.write_event_notifier(r).await,
            Command::WriteNodeBlankArray => self.write_blank_array(r).await,
            Command::WriteNodeValue => self.write_value(r).await,
            Command::ReadNodeNodeId => self.read_node_id(r).await,
            Command::ReadNodeNodeClass => self.read_node_class(r).await,
            Command::ReadNodeBrowseName => self.read_browse_name(r).await,
            Command::ReadNodeDisplayName => self.read_display_name(r).await,
            Command::ReadNodeDescription => self.read_description(r).await,
            Command::ReadNodeWriteMask => self.read_write_mask(r).await,
            Command::ReadNodeIsAbstract => self.read_is_abstract(r).await,
            Command::ReadNodeSymmetric => self.read_symmetric(r).await,
            Command::ReadNodeInverseName => self.read_inverse_name(r).await,
            Command::ReadNodeContainsNoLoops => self.read_contains_no_loops(r).await,
            Command::ReadNodeEventNotifier => self.read_event_notifier(r).await,
            Command::ReadNodeValueRank => self.read_value_rank(r).await,
            Command::ReadNodeArrayDimensions => self.read_array_dimensions(r).await,
            Command::ReadNodeAccessLevel => self.read_access_level(r).await,
            Command::ReadNodeMinimumSamplingInterval => {
                self.read_minimum_sampling_interval(r).await
            }
            Command::ReadNodeHistorizing => self.read_historizing(r).await,
            Command::ReadNodeExecutable => self.read_executable(r).await,
            Command::ReadNodeDataType => self.read_data_type(r).await,
            Command::ReadNodeValue => self.read_value(r).await,
            Command::ReadNodeValueByIndex => self.read_value_by_index(r).await,
            Command::ReadNodeValueByDataType => self.read_value_by_data_type(r).await,
            Command::SubscriptionCreate => self.subscription_create(r).await,
            Command::SubscriptionDelete => self.subscription_delete(r).await,
            Command::MonitoredItemCreate => self.monitored_item_create(r).await,
            Command::MonitoredItemDelete => self.monitored_item_delete(r).await,
        }
    }
}
