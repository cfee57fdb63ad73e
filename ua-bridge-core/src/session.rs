//! Per-connection command loop.
//!
//! One session owns one framed transport. Commands are processed strictly
//! one at a time in arrival order; store events interleave with replies on
//! the outbound side. A wire-contract violation ends this session only,
//! other sessions in the process are unaffected.

use crate::dispatch::Dispatcher;
use crate::echo::EchoGuard;
use crate::protocol::error::Result;
use crate::protocol::{envelope, FrameCodec};
use anyhow::Context;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::Framed;
use ua_bridge_common::BridgeConfig;
use ua_bridge_sdk::{NodeStore, StoreEvent, TargetMode};

/// Wire a configured session onto a transport and drive it to completion.
pub async fn serve<S, T>(
    transport: T,
    store: Arc<S>,
    mode: TargetMode,
    events: mpsc::UnboundedReceiver<StoreEvent>,
    config: &BridgeConfig,
) -> anyhow::Result<()>
where
    S: NodeStore,
    T: AsyncRead + AsyncWrite + Unpin,
{
    Session::new(store, mode, events, config.max_frame_bytes)
        .run(transport)
        .await
        .context("bridge session failed")
}

pub struct Session<S> {
    dispatcher: Dispatcher<S>,
    echo: Arc<EchoGuard>,
    events: mpsc::UnboundedReceiver<StoreEvent>,
    max_frame_bytes: usize,
}

impl<S: NodeStore> Session<S> {
    pub fn new(
        store: Arc<S>,
        mode: TargetMode,
        events: mpsc::UnboundedReceiver<StoreEvent>,
        max_frame_bytes: usize,
    ) -> Self {
        let echo = Arc::new(EchoGuard::new());
        Self {
            dispatcher: Dispatcher::new(store, echo.clone(), mode),
            echo,
            events,
            max_frame_bytes,
        }
    }

    /// Serve the transport until the peer closes it or the wire contract is
    /// broken. `Ok(())` is a clean peer-side close.
    pub async fn run<T>(self, transport: T) -> Result<()>
    where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        let Session {
            dispatcher,
            echo,
            mut events,
            max_frame_bytes,
        } = self;
        let mut framed = Framed::new(transport, FrameCodec::new(max_frame_bytes));
        let mut events_open = true;
        tracing::info!("session started");

        loop {
            tokio::select! {
                inbound = framed.next() => match inbound {
                    Some(body) => {
                        let reply = dispatcher.dispatch(body?).await.inspect_err(|e| {
                            tracing::error!(error = %e, "session terminated by protocol violation");
                        })?;
                        framed.send(reply).await?;
                    }
                    None => {
                        tracing::info!("session closed by peer");
                        return Ok(());
                    }
                },
                event = events.recv(), if events_open => match event {
                    Some(event) => {
                        if let Some(body) = event_body(&echo, event) {
                            framed.send(body).await?;
                        }
                    }
                    None => events_open = false,
                },
            }
        }
    }
}

/// Encode a store event, dropping echoes of the session's own writes.
fn event_body(echo: &EchoGuard, event: StoreEvent) -> Option<Bytes> {
    match event {
        StoreEvent::ValueWritten { node_id, value } => {
            if echo.absorb(&node_id) {
                tracing::trace!(%node_id, "suppressed write echo");
                return None;
            }
            Some(envelope::write_event(&node_id, &value))
        }
        StoreEvent::DataChanged {
            subscription_id,
            monitored_item_id,
            value,
        } => Some(envelope::monitored_item_data(
            subscription_id,
            monitored_item_id,
            &value,
        )),
        StoreEvent::SubscriptionDeleted { subscription_id } => {
            Some(envelope::subscription_deleted(subscription_id))
        }
        StoreEvent::SubscriptionTimeout { subscription_id } => {
            Some(envelope::subscription_timeout(subscription_id))
        }
        StoreEvent::MonitoredItemDeleted {
            subscription_id,
            monitored_item_id,
        } => Some(envelope::monitored_item_deleted(
            subscription_id,
            monitored_item_id,
        )),
    }
}
