//! Plain attribute reads and writes.
//!
//! Reads take a bare node identifier with no wrapping tuple. Writes take a
//! `{node_id, payload}` tuple; payload decode failures on free-form user
//! fields degrade to `einval` instead of aborting.

use super::{invalid, Dispatcher, HandlerResult, Reply};
use crate::protocol::assemble;
use crate::protocol::term::TermReader;
use crate::protocol::ResponseData;
use ua_bridge_sdk::{LocalizedText, NodeStore};

impl<S: NodeStore> Dispatcher<S> {
    // ===== writes =====

    pub(super) async fn write_browse_name(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_browse_name", 2)?;
        let node_id = assemble::node_id(r)?;
        let browse_name = assemble::qualified_name(r)?;

        self.store
            .write_browse_name(self.mode, &node_id, browse_name)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_display_name(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_display_name", 3)?;
        let node_id = assemble::node_id(r)?;
        let text = localized_text_args(r)?;

        self.store
            .write_display_name(self.mode, &node_id, text)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_description(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_description", 3)?;
        let node_id = assemble::node_id(r)?;
        let text = localized_text_args(r)?;

        self.store
            .write_description(self.mode, &node_id, text)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_inverse_name(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_inverse_name", 3)?;
        let node_id = assemble::node_id(r)?;
        let text = localized_text_args(r)?;

        self.store
            .write_inverse_name(self.mode, &node_id, text)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_write_mask(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_write_mask", 2)?;
        let node_id = assemble::node_id(r)?;
        let mask = r.read_u32("write_mask").map_err(invalid)?;

        self.store.write_write_mask(self.mode, &node_id, mask).await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_is_abstract(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_is_abstract", 2)?;
        let node_id = assemble::node_id(r)?;
        let is_abstract = r.read_bool("is_abstract").map_err(invalid)?;

        self.store
            .write_is_abstract(self.mode, &node_id, is_abstract)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_data_type(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_data_type", 2)?;
        let node_id = assemble::node_id(r)?;
        let data_type = assemble::node_id(r)?;

        self.store
            .write_data_type(self.mode, &node_id, data_type)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_value_rank(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_value_rank", 2)?;
        let node_id = assemble::node_id(r)?;
        let value_rank = r.read_i32("value_rank").map_err(invalid)?;

        self.store
            .write_value_rank(self.mode, &node_id, value_rank)
            .await?;
        Ok(Reply::Ok)
    }

    /// `{node_id, dimension_count, dimensions_tuple}`. A dimensions tuple
    /// whose arity disagrees with the announced count is a wire violation.
    pub(super) async fn write_array_dimensions(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_array_dimensions", 3)?;
        let node_id = assemble::node_id(r)?;
        let count = r.read_u32("dimension_count").map_err(invalid)? as usize;

        r.expect_tuple("array_dimensions", count)?;
        let mut dimensions = Vec::with_capacity(count);
        for _ in 0..count {
            dimensions.push(r.read_u32("array_dimension").map_err(invalid)?);
        }

        self.store
            .write_array_dimensions(self.mode, &node_id, dimensions)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_access_level(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_access_level", 2)?;
        let node_id = assemble::node_id(r)?;
        let level = r.read_u8_int("access_level").map_err(invalid)?;

        self.store
            .write_access_level(self.mode, &node_id, level)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_minimum_sampling_interval(
        &self,
        r: &mut TermReader,
    ) -> HandlerResult {
        r.expect_tuple("write_node_minimum_sampling_interval", 2)?;
        let node_id = assemble::node_id(r)?;
        let interval = r.read_f64("sampling_interval").map_err(invalid)?;

        self.store
            .write_minimum_sampling_interval(self.mode, &node_id, interval)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_historizing(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_historizing", 2)?;
        let node_id = assemble::node_id(r)?;
        let historizing = r.read_bool("historizing").map_err(invalid)?;

        self.store
            .write_historizing(self.mode, &node_id, historizing)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_executable(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_executable", 2)?;
        let node_id = assemble::node_id(r)?;
        let executable = r.read_bool("executable").map_err(invalid)?;

        self.store
            .write_executable(self.mode, &node_id, executable)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn write_event_notifier(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("write_node_event_notifier", 2)?;
        let node_id = assemble::node_id(r)?;
        let notifier = r.read_u8_int("event_notifier").map_err(invalid)?;

        self.store
            .write_event_notifier(self.mode, &node_id, notifier)
            .await?;
        Ok(Reply::Ok)
    }

    // ===== reads =====

    pub(super) async fn read_node_id(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let value = self.store.read_node_id(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::NodeId(value)))
    }

    pub(super) async fn read_node_class(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let class = self.store.read_node_class(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::CharList(class.as_str())))
    }

    pub(super) async fn read_browse_name(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let name = self.store.read_browse_name(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::QualifiedName(name)))
    }

    pub(super) async fn read_display_name(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let text = self.store.read_display_name(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::LocalizedText(text)))
    }

    pub(super) async fn read_description(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let text = self.store.read_description(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::LocalizedText(text)))
    }

    pub(super) async fn read_write_mask(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let mask = self.store.read_write_mask(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::UInt(u64::from(mask))))
    }

    pub(super) async fn read_is_abstract(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let value = self.store.read_is_abstract(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::Boolean(value)))
    }

    pub(super) async fn read_symmetric(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let value = self.store.read_symmetric(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::Boolean(value)))
    }

    pub(super) async fn read_inverse_name(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let text = self.store.read_inverse_name(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::LocalizedText(text)))
    }

    pub(super) async fn read_contains_no_loops(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let value = self
            .store
            .read_contains_no_loops(self.mode, &node_id)
            .await?;
        Ok(Reply::Data(ResponseData::Boolean(value)))
    }

    pub(super) async fn read_event_notifier(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let value = self.store.read_event_notifier(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::UInt(u64::from(value))))
    }

    pub(super) async fn read_value_rank(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let rank = self.store.read_value_rank(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::Int(i64::from(rank))))
    }

    pub(super) async fn read_array_dimensions(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let dims = self
            .store
            .read_array_dimensions(self.mode, &node_id)
            .await?;
        Ok(Reply::Data(ResponseData::ArrayDimensions(dims)))
    }

    pub(super) async fn read_access_level(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let level = self.store.read_access_level(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::UInt(u64::from(level))))
    }

    pub(super) async fn read_minimum_sampling_interval(
        &self,
        r: &mut TermReader,
    ) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let interval = self
            .store
            .read_minimum_sampling_interval(self.mode, &node_id)
            .await?;
        Ok(Reply::Data(ResponseData::Double(interval)))
    }

    pub(super) async fn read_historizing(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let value = self.store.read_historizing(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::Boolean(value)))
    }

    pub(super) async fn read_executable(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let value = self.store.read_executable(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::Boolean(value)))
    }

    pub(super) async fn read_data_type(&self, r: &mut TermReader) -> HandlerResult {
        let node_id = assemble::node_id(r)?;
        let data_type = self.store.read_data_type(self.mode, &node_id).await?;
        Ok(Reply::Data(ResponseData::NodeId(data_type)))
    }
}

/// Locale and text arrive inline in the argument tuple, not nested.
fn localized_text_args(
    r: &mut TermReader,
) -> Result<LocalizedText, crate::protocol::ProtocolError> {
    let locale = r.read_binary_string("locale")?;
    let text = r.read_binary_string("text")?;
    Ok(LocalizedText { locale, text })
}
