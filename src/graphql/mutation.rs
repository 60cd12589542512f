use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::db::{LabelUpdate, NewLabel};

use super::{
    label_id, label_ids, labelable_id, org_id, service, viewer, CreateLabelInput, EmptyResponse,
    LabelNode, LabelableNode, UpdateLabelInput,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a label in an organization. Members and site admins only.
    async fn create_label(&self, ctx: &Context<'_>, input: CreateLabelInput) -> Result<LabelNode> {
        let owner_org_id = org_id(&input.owner).map_err(|e| e.extend())?;
        service(ctx)?
            .create_label(
                viewer(ctx),
                NewLabel {
                    owner_org_id,
                    name: input.name,
                    description: input.description,
                    color: input.color,
                },
            )
            .await
            .map(LabelNode)
            .map_err(|e| e.extend())
    }

    async fn update_label(&self, ctx: &Context<'_>, input: UpdateLabelInput) -> Result<LabelNode> {
        let id = label_id(&input.id).map_err(|e| e.extend())?;
        service(ctx)?
            .update_label(
                viewer(ctx),
                id,
                LabelUpdate {
                    name: input.name,
                    description: input.description,
                    color: input.color,
                },
            )
            .await
            .map(LabelNode)
            .map_err(|e| e.extend())
    }

    async fn delete_label(&self, ctx: &Context<'_>, label: ID) -> Result<Option<EmptyResponse>> {
        let id = label_id(&label).map_err(|e| e.extend())?;
        service(ctx)?
            .delete_label(viewer(ctx), id)
            .await
            .map_err(|e| e.extend())?;
        Ok(None)
    }

    /// Any viewer may add labels to a thread, as long as they can see the labels.
    async fn add_labels_to_labelable(
        &self,
        ctx: &Context<'_>,
        labelable: ID,
        labels: Vec<ID>,
    ) -> Result<LabelableNode> {
        let target = labelable_id(&labelable).map_err(|e| e.extend())?;
        let ids = label_ids(&labels).map_err(|e| e.extend())?;
        service(ctx)?
            .add_labels_to_labelable(viewer(ctx), target, &ids)
            .await
            .map(LabelableNode::from)
            .map_err(|e| e.extend())
    }

    async fn remove_labels_from_labelable(
        &self,
        ctx: &Context<'_>,
        labelable: ID,
        labels: Vec<ID>,
    ) -> Result<LabelableNode> {
        let target = labelable_id(&labelable).map_err(|e| e.extend())?;
        let ids = label_ids(&labels).map_err(|e| e.extend())?;
        service(ctx)?
            .remove_labels_from_labelable(viewer(ctx), target, &ids)
            .await
            .map(LabelableNode::from)
            .map_err(|e| e.extend())
    }
}
