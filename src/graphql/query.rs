use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::{error::LabelError, labels::Labelable};

use super::{
    labelable_id, org_id, page_size, service, viewer, LabelConnectionNode, LabelNode, OrgNode,
    ThreadNode,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Labels on a labelable, optionally limited to the first `first`
    async fn labels_for(
        &self,
        ctx: &Context<'_>,
        labelable: ID,
        first: Option<i32>,
    ) -> Result<LabelConnectionNode> {
        let first = page_size(first)?;
        let labelable = labelable_id(&labelable).map_err(|e| e.extend())?;
        service(ctx)?
            .labels_for(viewer(ctx), labelable, first)
            .await
            .map(LabelConnectionNode)
            .map_err(|e| e.extend())
    }

    /// Look up a label. `null` if it does not exist.
    async fn label(&self, ctx: &Context<'_>, id: ID) -> Result<Option<LabelNode>> {
        let found = match super::label_id(&id) {
            Ok(label_id) => service(ctx)?.label_by_id(viewer(ctx), label_id).await,
            Err(err) => Err(err),
        };
        not_found_as_none(found.map(LabelNode))
    }

    async fn org(&self, ctx: &Context<'_>, id: ID) -> Result<Option<OrgNode>> {
        let found = match org_id(&id) {
            Ok(org_id) => service(ctx)?.org_by_id(org_id).await,
            Err(err) => Err(err),
        };
        not_found_as_none(found.map(OrgNode))
    }

    async fn discussion_thread(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ThreadNode>> {
        let found = match labelable_id(&id) {
            Ok(id) => service(ctx)?.labelable_by_id(id).await,
            Err(err) => Err(err),
        };
        not_found_as_none(found.map(|Labelable::Thread(thread)| ThreadNode(thread)))
    }
}

fn not_found_as_none<T>(result: Result<T, LabelError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(LabelError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err.extend()),
    }
}
