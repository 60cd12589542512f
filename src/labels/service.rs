use crate::{
    auth::{check_org_access, Viewer},
    db::{Database, Label, LabelUpdate, NewLabel, Org},
    error::{LabelError, Result},
    log_info,
    pagination::Connection,
};

use super::{Labelable, LabelableId};

const ENABLE_LOGS: bool = true;

pub type LabelConnection = Connection<Label>;

/// Label CRUD and thread-label links, authorized per call against the
/// label's owning organization.
#[derive(Clone)]
pub struct LabelService {
    db: Database,
}

impl LabelService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub async fn org_by_id(&self, org_id: i64) -> Result<Org> {
        self.db
            .get_org(org_id)
            .await?
            .ok_or_else(|| LabelError::not_found("organization", org_id))
    }

    /// Only organization members and site admins may see an organization's
    /// labels; every path that hands out a label goes through here.
    pub async fn label_by_id(&self, viewer: Viewer, label_id: i64) -> Result<Label> {
        let label = self
            .db
            .get_label(label_id)
            .await?
            .ok_or_else(|| LabelError::not_found("label", label_id))?;
        check_org_access(&self.db, viewer, label.owner_org_id).await?;
        Ok(label)
    }

    pub async fn labelable_by_id(&self, id: LabelableId) -> Result<Labelable> {
        match id {
            LabelableId::Thread(thread_id) => self
                .db
                .get_thread(thread_id)
                .await?
                .map(Labelable::Thread)
                .ok_or_else(|| LabelError::not_found("discussion thread", thread_id)),
        }
    }

    /// Every label linked to `labelable`. One inaccessible label fails the
    /// whole list.
    //
    // TODO: anyone can link a private-org label to a public thread, which then
    // breaks this list for viewers outside that org. Thread and label
    // permissions need to be reconciled before this is changed.
    pub async fn list_labels(&self, viewer: Viewer, labelable: &Labelable) -> Result<Vec<Label>> {
        let links = match labelable {
            Labelable::Thread(thread) => self.db.list_label_objects(thread.id).await?,
        };

        let mut labels = Vec::with_capacity(links.len());
        for link in links {
            labels.push(self.label_by_id(viewer, link.label_id).await?);
        }
        Ok(labels)
    }

    pub async fn labels_for(
        &self,
        viewer: Viewer,
        id: LabelableId,
        first: Option<usize>,
    ) -> Result<LabelConnection> {
        let labelable = self.labelable_by_id(id).await?;
        let labels = self.list_labels(viewer, &labelable).await?;
        Ok(Connection::new(labels, first))
    }

    /// All labels defined by an organization, for its members
    pub async fn labels_for_org(
        &self,
        viewer: Viewer,
        org_id: i64,
        first: Option<usize>,
    ) -> Result<LabelConnection> {
        let org = self.org_by_id(org_id).await?;
        check_org_access(&self.db, viewer, org.id).await?;
        let labels = self.db.get_labels_for_org(org.id).await?;
        Ok(Connection::new(labels, first))
    }

    pub async fn create_label(&self, viewer: Viewer, input: NewLabel) -> Result<Label> {
        let owner = self.org_by_id(input.owner_org_id).await?;
        check_org_access(&self.db, viewer, owner.id).await?;

        let label = self
            .db
            .create_label(NewLabel {
                owner_org_id: owner.id,
                ..input
            })
            .await?;
        log_info!("Created label {} '{}' in org {}", label.id, label.name, owner.name);
        Ok(label)
    }

    pub async fn update_label(
        &self,
        viewer: Viewer,
        label_id: i64,
        update: LabelUpdate,
    ) -> Result<Label> {
        let existing = self.label_by_id(viewer, label_id).await?;
        let label = self.db.update_label(existing.id, update).await?;
        log_info!("Updated label {}", label.id);
        Ok(label)
    }

    pub async fn delete_label(&self, viewer: Viewer, label_id: i64) -> Result<()> {
        let existing = self.label_by_id(viewer, label_id).await?;
        self.db.delete_label(existing.id).await?;
        log_info!("Deleted label {}", existing.id);
        Ok(())
    }

    pub async fn add_labels_to_labelable(
        &self,
        viewer: Viewer,
        id: LabelableId,
        label_ids: &[i64],
    ) -> Result<Labelable> {
        self.add_remove_labels(viewer, id, label_ids, &[]).await
    }

    pub async fn remove_labels_from_labelable(
        &self,
        viewer: Viewer,
        id: LabelableId,
        label_ids: &[i64],
    ) -> Result<Labelable> {
        self.add_remove_labels(viewer, id, &[], label_ids).await
    }

    // Any viewer may change a thread's labels; only the labels themselves are
    // checked.
    async fn add_remove_labels(
        &self,
        viewer: Viewer,
        id: LabelableId,
        add: &[i64],
        remove: &[i64],
    ) -> Result<Labelable> {
        let labelable = self.labelable_by_id(id).await?;
        let Labelable::Thread(thread) = &labelable;

        if !add.is_empty() {
            let label_ids = self.accessible_label_ids(viewer, add).await?;
            self.db.add_labels_to_thread(thread.id, &label_ids).await?;
            log_info!("Added labels {label_ids:?} to thread {}", thread.id);
        }

        if !remove.is_empty() {
            let label_ids = self.accessible_label_ids(viewer, remove).await?;
            self.db
                .remove_labels_from_thread(thread.id, &label_ids)
                .await?;
            log_info!("Removed labels {label_ids:?} from thread {}", thread.id);
        }

        Ok(labelable)
    }

    async fn accessible_label_ids(&self, viewer: Viewer, label_ids: &[i64]) -> Result<Vec<i64>> {
        let mut ids = Vec::with_capacity(label_ids.len());
        for &label_id in label_ids {
            ids.push(self.label_by_id(viewer, label_id).await?.id);
        }
        Ok(ids)
    }
}
