//! GraphQL surface for labels.
//!
//! - [`QueryRoot`]: `labelsFor`, plus lookups for labels, orgs and threads
//! - [`MutationRoot`]: label CRUD and adding/removing labels on labelables
//!
//! The caller's [`Viewer`] travels as per-request data and is handed to the
//! service explicitly on every call.

mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::*;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Request, Response, Schema, ID};

use crate::{
    auth::Viewer,
    error::LabelError,
    ids::GlobalId,
    labels::{LabelService, LabelableId},
};

pub type LabelSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: LabelService) -> LabelSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

/// Run one request on behalf of `viewer`
pub async fn execute(schema: &LabelSchema, request: Request, viewer: Viewer) -> Response {
    schema.execute(request.data(viewer)).await
}

impl ErrorExtensions for LabelError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

fn service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a LabelService> {
    ctx.data::<LabelService>()
}

fn viewer(ctx: &Context<'_>) -> Viewer {
    ctx.data_opt::<Viewer>().copied().unwrap_or_default()
}

fn page_size(first: Option<i32>) -> async_graphql::Result<Option<usize>> {
    first
        .map(|first| {
            usize::try_from(first).map_err(|_| {
                async_graphql::Error::new("first must be non-negative")
                    .extend_with(|_, e| e.set("code", "INVALID_ARGUMENT"))
            })
        })
        .transpose()
}

fn label_id(id: &ID) -> Result<i64, LabelError> {
    match GlobalId::decode(id) {
        Some(GlobalId::Label(label_id)) => Ok(label_id),
        _ => Err(LabelError::not_found("label", id.as_str())),
    }
}

fn org_id(id: &ID) -> Result<i64, LabelError> {
    match GlobalId::decode(id) {
        Some(GlobalId::Org(org_id)) => Ok(org_id),
        _ => Err(LabelError::not_found("organization", id.as_str())),
    }
}

fn labelable_id(id: &ID) -> Result<LabelableId, LabelError> {
    match GlobalId::decode(id) {
        Some(GlobalId::Thread(thread_id)) => Ok(LabelableId::Thread(thread_id)),
        _ => Err(LabelError::not_found("labelable", id.as_str())),
    }
}

fn label_ids(ids: &[ID]) -> Result<Vec<i64>, LabelError> {
    ids.iter().map(label_id).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::db::Database;

    struct Fixture {
        schema: LabelSchema,
        db: Database,
        org: String,
        thread: String,
        member: Viewer,
        outsider: Viewer,
    }

    async fn fixture() -> Fixture {
        let db = Database::in_memory().unwrap();
        let org = db.create_org("acme").await.unwrap();
        let alice = db.create_user("alice", false).await.unwrap();
        let mallory = db.create_user("mallory", false).await.unwrap();
        db.add_org_member(org.id, alice.id).await.unwrap();
        let thread = db.create_thread("Flaky CI").await.unwrap();

        Fixture {
            schema: build_schema(LabelService::new(db.clone())),
            db,
            org: GlobalId::Org(org.id).encode(),
            thread: GlobalId::Thread(thread.id).encode(),
            member: Viewer::user(alice.id),
            outsider: Viewer::user(mallory.id),
        }
    }

    async fn run(f: &Fixture, viewer: Viewer, query: &str, variables: Value) -> Response {
        let request =
            Request::new(query).variables(async_graphql::Variables::from_json(variables));
        execute(&f.schema, request, viewer).await
    }

    fn data(response: Response) -> Value {
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    fn error_code(response: &Response) -> Option<String> {
        let ext = response.errors.first()?.extensions.as_ref()?;
        match ext.get("code")? {
            async_graphql::Value::String(code) => Some(code.clone()),
            _ => None,
        }
    }

    const CREATE: &str = r#"
        mutation($input: CreateLabelInput!) {
            createLabel(input: $input) { id name description color owner { name } }
        }"#;

    async fn create_label(f: &Fixture, name: &str) -> String {
        let out = data(
            run(
                f,
                f.member,
                CREATE,
                json!({ "input": { "owner": f.org, "name": name, "color": "#c5def5" } }),
            )
            .await,
        );
        out["createLabel"]["id"].as_str().unwrap().to_string()
    }

    const ADD: &str = r#"
        mutation($labelable: ID!, $labels: [ID!]!) {
            addLabelsToLabelable(labelable: $labelable, labels: $labels) {
                ... on DiscussionThread { title }
            }
        }"#;

    const LABELS_FOR: &str = r#"
        query($labelable: ID!, $first: Int) {
            labelsFor(labelable: $labelable, first: $first) {
                nodes { name }
                totalCount
                pageInfo { hasNextPage }
            }
        }"#;

    #[tokio::test]
    async fn create_label_returns_label_with_owner() {
        let f = fixture().await;
        let out = data(
            run(
                &f,
                f.member,
                CREATE,
                json!({ "input": {
                    "owner": f.org,
                    "name": "bug",
                    "description": "Something is broken",
                    "color": "#d73a4a",
                } }),
            )
            .await,
        );

        let label = &out["createLabel"];
        assert_eq!(label["name"], "bug");
        assert_eq!(label["description"], "Something is broken");
        assert_eq!(label["color"], "#d73a4a");
        assert_eq!(label["owner"]["name"], "acme");
    }

    #[tokio::test]
    async fn create_label_as_outsider_is_denied() {
        let f = fixture().await;
        let response = run(
            &f,
            f.outsider,
            CREATE,
            json!({ "input": { "owner": f.org, "name": "spam", "color": "#000000" } }),
        )
        .await;

        assert_eq!(error_code(&response).as_deref(), Some("PERMISSION_DENIED"));
        assert!(f.db.get_labels_for_org(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn labels_for_paginates() {
        let f = fixture().await;
        let mut ids = Vec::new();
        for name in ["L1", "L2", "L3"] {
            ids.push(create_label(&f, name).await);
        }
        data(run(&f, f.member, ADD, json!({ "labelable": f.thread, "labels": ids })).await);

        let out = data(
            run(&f, f.member, LABELS_FOR, json!({ "labelable": f.thread, "first": 2 })).await,
        );
        assert_eq!(
            out["labelsFor"],
            json!({
                "nodes": [{ "name": "L1" }, { "name": "L2" }],
                "totalCount": 3,
                "pageInfo": { "hasNextPage": true },
            })
        );
    }

    #[tokio::test]
    async fn negative_first_is_rejected() {
        let f = fixture().await;
        let response =
            run(&f, f.member, LABELS_FOR, json!({ "labelable": f.thread, "first": -1 })).await;
        assert_eq!(error_code(&response).as_deref(), Some("INVALID_ARGUMENT"));
    }

    #[tokio::test]
    async fn add_then_remove_through_thread_labels_field() {
        let f = fixture().await;
        let bug = create_label(&f, "bug").await;
        let ci = create_label(&f, "ci").await;

        let out = data(
            run(&f, f.member, ADD, json!({ "labelable": f.thread, "labels": [bug, ci] })).await,
        );
        assert_eq!(out["addLabelsToLabelable"]["title"], "Flaky CI");

        let out = data(
            run(
                &f,
                f.member,
                r#"mutation($labelable: ID!, $labels: [ID!]!) {
                    removeLabelsFromLabelable(labelable: $labelable, labels: $labels) {
                        ... on DiscussionThread { labels { nodes { name } totalCount } }
                    }
                }"#,
                json!({ "labelable": f.thread, "labels": [bug] }),
            )
            .await,
        );
        assert_eq!(
            out["removeLabelsFromLabelable"]["labels"],
            json!({ "nodes": [{ "name": "ci" }], "totalCount": 1 })
        );
    }

    #[tokio::test]
    async fn update_and_delete_label() {
        let f = fixture().await;
        let id = create_label(&f, "bug").await;

        let out = data(
            run(
                &f,
                f.member,
                r#"mutation($input: UpdateLabelInput!) {
                    updateLabel(input: $input) { id name color }
                }"#,
                json!({ "input": { "id": id, "color": "#0e8a16" } }),
            )
            .await,
        );
        assert_eq!(
            out["updateLabel"],
            json!({ "id": id, "name": "bug", "color": "#0e8a16" })
        );

        let denied = run(
            &f,
            f.outsider,
            "mutation($id: ID!) { deleteLabel(label: $id) { alwaysNil } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(error_code(&denied).as_deref(), Some("PERMISSION_DENIED"));

        let out = data(
            run(
                &f,
                f.member,
                "mutation($id: ID!) { deleteLabel(label: $id) { alwaysNil } }",
                json!({ "id": id }),
            )
            .await,
        );
        assert_eq!(out["deleteLabel"], Value::Null);

        let out = data(
            run(&f, f.member, "query($id: ID!) { label(id: $id) { name } }", json!({ "id": id }))
                .await,
        );
        assert_eq!(out["label"], Value::Null);
    }

    #[tokio::test]
    async fn wrong_kind_of_id_is_not_found() {
        let f = fixture().await;
        let response = run(
            &f,
            f.member,
            LABELS_FOR,
            json!({ "labelable": f.org, "first": null }),
        )
        .await;
        assert_eq!(error_code(&response).as_deref(), Some("NOT_FOUND"));
    }

    #[tokio::test]
    async fn org_labels_connection() {
        let f = fixture().await;
        create_label(&f, "a").await;
        create_label(&f, "b").await;

        let out = data(
            run(
                &f,
                f.member,
                "query($id: ID!) { org(id: $id) { name labels(first: 1) { totalCount pageInfo { hasNextPage } } } }",
                json!({ "id": f.org }),
            )
            .await,
        );
        assert_eq!(
            out["org"],
            json!({
                "name": "acme",
                "labels": { "totalCount": 2, "pageInfo": { "hasNextPage": true } },
            })
        );
    }
}
