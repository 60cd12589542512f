use async_graphql::{
    Context, ErrorExtensions, InputObject, Object, Result, SimpleObject, Union, ID,
};

use crate::{
    db::{Label, Org, Thread},
    ids::GlobalId,
    labels::{LabelConnection, Labelable},
};

use super::{page_size, service, viewer};

/// A label that can be applied to discussion threads
pub struct LabelNode(pub Label);

#[Object(name = "Label")]
impl LabelNode {
    async fn id(&self) -> ID {
        ID(GlobalId::Label(self.0.id).encode())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    /// Hex color, `#RRGGBB` or `#RRGGBBAA`
    async fn color(&self) -> &str {
        &self.0.color
    }

    /// The organization that owns this label
    async fn owner(&self, ctx: &Context<'_>) -> Result<OrgNode> {
        service(ctx)?
            .org_by_id(self.0.owner_org_id)
            .await
            .map(OrgNode)
            .map_err(|e| e.extend())
    }
}

pub struct OrgNode(pub Org);

#[Object(name = "Org")]
impl OrgNode {
    async fn id(&self) -> ID {
        ID(GlobalId::Org(self.0.id).encode())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    /// Labels defined by this organization. Members and site admins only.
    async fn labels(&self, ctx: &Context<'_>, first: Option<i32>) -> Result<LabelConnectionNode> {
        let first = page_size(first)?;
        service(ctx)?
            .labels_for_org(viewer(ctx), self.0.id, first)
            .await
            .map(LabelConnectionNode)
            .map_err(|e| e.extend())
    }
}

pub struct ThreadNode(pub Thread);

#[Object(name = "DiscussionThread")]
impl ThreadNode {
    async fn id(&self) -> ID {
        ID(GlobalId::Thread(self.0.id).encode())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn labels(&self, ctx: &Context<'_>, first: Option<i32>) -> Result<LabelConnectionNode> {
        let first = page_size(first)?;
        let labelable = Labelable::Thread(self.0.clone());
        let labels = service(ctx)?
            .list_labels(viewer(ctx), &labelable)
            .await
            .map_err(|e| e.extend())?;
        Ok(LabelConnectionNode(LabelConnection::new(labels, first)))
    }
}

/// Something labels can be added to
#[derive(Union)]
#[graphql(name = "Labelable")]
pub enum LabelableNode {
    DiscussionThread(ThreadNode),
}

impl From<Labelable> for LabelableNode {
    fn from(labelable: Labelable) -> Self {
        match labelable {
            Labelable::Thread(thread) => LabelableNode::DiscussionThread(ThreadNode(thread)),
        }
    }
}

#[derive(SimpleObject)]
pub struct PageInfo {
    pub has_next_page: bool,
}

pub struct LabelConnectionNode(pub LabelConnection);

#[Object(name = "LabelConnection")]
impl LabelConnectionNode {
    async fn nodes(&self) -> Vec<LabelNode> {
        self.0.nodes().iter().cloned().map(LabelNode).collect()
    }

    /// Number of labels before `first` was applied
    async fn total_count(&self) -> i32 {
        i32::try_from(self.0.total_count()).unwrap_or(i32::MAX)
    }

    async fn page_info(&self) -> PageInfo {
        PageInfo {
            has_next_page: self.0.page_info().has_next_page,
        }
    }
}

#[derive(SimpleObject)]
pub struct EmptyResponse {
    pub always_nil: Option<String>,
}

#[derive(InputObject)]
pub struct CreateLabelInput {
    /// ID of the owning organization
    pub owner: ID,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

#[derive(InputObject)]
pub struct UpdateLabelInput {
    pub id: ID,
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}
