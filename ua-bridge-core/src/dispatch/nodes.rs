//! Node lifecycle commands.

use super::{invalid, Command, Dispatcher, HandlerResult, Reply};
use crate::protocol::assemble;
use crate::protocol::term::TermReader;
use ua_bridge_sdk::{AddNodeRequest, NodeStore};

impl<S: NodeStore> Dispatcher<S> {
    /// Variable, variable type and object nodes carry a type definition in
    /// their argument tuple; the remaining node classes do not.
    pub(super) async fn add_node(&self, command: Command, r: &mut TermReader) -> HandlerResult {
        let with_type_definition = matches!(
            command,
            Command::AddVariableNode | Command::AddVariableTypeNode | Command::AddObjectNode
        );
        let arity = if with_type_definition { 5 } else { 4 };
        r.expect_tuple(command.as_str(), arity)?;

        let requested_new_node_id = assemble::node_id(r)?;
        let parent_node_id = assemble::node_id(r)?;
        let reference_type_node_id = assemble::node_id(r)?;
        let browse_name = assemble::qualified_name(r)?;
        let type_definition = if with_type_definition {
            Some(assemble::node_id(r)?)
        } else {
            None
        };

        let req = AddNodeRequest {
            requested_new_node_id,
            parent_node_id,
            reference_type_node_id,
            browse_name,
            type_definition,
        };

        match command {
            Command::AddVariableNode => self.store.add_variable_node(self.mode, req).await?,
            Command::AddVariableTypeNode => {
                self.store.add_variable_type_node(self.mode, req).await?
            }
            Command::AddObjectNode => self.store.add_object_node(self.mode, req).await?,
            Command::AddObjectTypeNode => self.store.add_object_type_node(self.mode, req).await?,
            Command::AddViewNode => self.store.add_view_node(self.mode, req).await?,
            Command::AddReferenceTypeNode => {
                self.store.add_reference_type_node(self.mode, req).await?
            }
            Command::AddDataTypeNode => self.store.add_data_type_node(self.mode, req).await?,
            other => unreachable!("not a node-addition command: {other:?}"),
        }

        Ok(Reply::Ok)
    }

    pub(super) async fn delete_node(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("delete_node", 2)?;
        let node_id = assemble::node_id(r)?;
        let delete_references = r.read_bool("delete_references").map_err(invalid)?;

        self.store
            .delete_node(self.mode, node_id, delete_references)
            .await?;
        Ok(Reply::Ok)
    }

    pub(super) async fn delete_reference(&self, r: &mut TermReader) -> HandlerResult {
        r.expect_tuple("delete_reference", 5)?;
        let source_id = assemble::node_id(r)?;
        let reference_type_id = assemble::node_id(r)?;
        let target_id = assemble::expanded_node_id(r)?;
        let is_forward = r.read_bool("is_forward").map_err(invalid)?;
        let delete_bidirectional = r.read_bool("delete_bidirectional").map_err(invalid)?;

        self.store
            .delete_reference(
                self.mode,
                source_id,
                reference_type_id,
                target_id,
                is_forward,
                delete_bidirectional,
            )
            .await?;
        Ok(Reply::Ok)
    }
}
