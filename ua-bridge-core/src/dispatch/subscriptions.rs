//! Subscription and monitored item commands.

use super::{invalid, Dispatcher, HandlerResult, Reply};
use crate::protocol::assemble;
use crate::protocol::term::TermReader;
use crate::protocol::ResponseData;
use ua_bridge_sdk::NodeStore;

impl<S: NodeStore> Dispatcher<S> {
    /// Publishing interval in milliseconds; replies with the new id.
    pub(super) async fn subscription_create(&self, r: &mut TermReader) -> HandlerResult {
        let interval = r.read_f64("publishing_interval").map_err(invalid)?;

        let subscription_id = self.store.create_subscription(self.mode, interval).await?;
        Ok(Reply::Data(ResponseData::UInt(u64::from(subscription_id))))
    }

    pub(super) async fn subscription_delete(&self, r: &mut TermReader) -> HandlerResult {
        let subscription_id = r.read_u32("subscription_id").map_err(invalid)?;

        self.store
            .delete_subscription(self.mode, subscription_id)
            .await?;
        Ok(Reply::Ok)
    }

    /// `{node_id, subscription_id, sampling_interval}`
    pub(super) async fn monitored_item_create(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("monitored_item_create", 3)?;
        let node_id = assemble::node_id(r)?;
        let subscription_id = r.read_u32("subscription_id").map_err(invalid)?;
        let interval = r.read_f64("sampling_interval").map_err(invalid)?;

        let monitored_item_id = self
            .store
            .create_monitored_item(self.mode, subscription_id, node_id, interval)
            .await?;
        Ok(Reply::Data(ResponseData::UInt(u64::from(
            monitored_item_id,
        ))))
    }

    /// `{subscription_id, monitored_item_id}`
    pub(super) async fn monitored_item_delete(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("monitored_item_delete", 2)?;
        let subscription_id = r.read_u32("subscription_id").map_err(invalid)?;
        let monitored_item_id = r.read_u32("monitored_item_id").map_err(invalid)?;

        self.store
            .delete_monitored_item(self.mode, subscription_id, monitored_item_id)
            .await?;
        Ok(Reply::Ok)
    }
}
