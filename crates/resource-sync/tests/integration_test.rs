use resource_sync::accessor;
use resource_sync::mock::MockTransport;
use resource_sync::transport::Method;
use resource_sync::{
    FieldMap, FrameworkError, ModuleClient, ModuleFacade, ModulePath, ModuleRegistration,
    OperationBindings, OperationDef, OperationKind, OperationRegistry, RequestError,
    ResourceClient, ResourceEntity, ResourceId, ScopeDescriptor, Store, StoreActor, StoreHandle,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Developer {
    id: ResourceId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    status: Option<String>,
}

impl ResourceEntity for Developer {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

fn developer_map() -> FieldMap {
    FieldMap::new(&[("developer_name", "name")])
}

struct Session {
    mock: Arc<MockTransport>,
    store: StoreHandle,
    developers: ModuleClient<Developer>,
    registry: Arc<OperationRegistry>,
}

fn developers_path() -> ModulePath {
    ModulePath::new("catalog", "developers")
}

/// Registry + store actor with one `catalog/developers` module (per page 10).
fn session() -> Session {
    let bindings = OperationBindings::crud("developers").with_status("developers");
    let store = Store::builder()
        .register(
            ModuleRegistration::<Developer>::new(developers_path(), bindings.clone())
                .with_field_map(developer_map()),
        )
        .unwrap()
        .build();
    let (actor, store_handle) = StoreActor::new(store);
    tokio::spawn(actor.run());

    let mock = Arc::new(MockTransport::new());
    let mut defs = OperationDef::crud("developers", "/developers");
    defs.push(OperationDef::status("developers", "/developers"));
    let registry = Arc::new(
        OperationRegistry::builder(mock.clone())
            .define_all(defs)
            .unwrap()
            .subscribe(Arc::new(store_handle.clone()))
            .build(),
    );

    let developers = ModuleClient::new(
        ResourceClient::new(registry.clone(), developers_path(), bindings, developer_map()),
        store_handle.clone(),
    );
    Session {
        mock,
        store: store_handle,
        developers,
        registry,
    }
}

#[tokio::test]
async fn test_list_nested_page_end_to_end() {
    let s = session();
    s.mock.on(Method::Get, "/developers").with_query(json!({"page": 1})).reply(json!({
        "data": [{"id": 1, "developer_name": "A"}],
        "current_page": 1,
        "last_page": 3,
        "total": 120,
        "per_page": 50
    }));

    s.developers.list(json!({"page": 1})).await.unwrap();

    let items = s.developers.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "A");
    assert_eq!(items[0].raw["developer_name"], "A");

    let pagination = s.developers.pagination().await.unwrap();
    assert_eq!(
        (pagination.current_page, pagination.total_pages),
        (1, 3)
    );
    assert_eq!((pagination.total_items, pagination.per_page), (120, 50));
    assert!(!s.developers.is_loading().await.unwrap());
    s.mock.verify();
}

#[tokio::test]
async fn test_flat_array_uses_module_default_per_page() {
    let s = session();
    s.mock.on(Method::Get, "/developers").reply(json!([{"id": 2}]));

    s.developers.list(json!({})).await.unwrap();

    let pagination = s.developers.pagination().await.unwrap();
    assert_eq!(pagination.current_page, 1);
    assert_eq!(pagination.total_pages, 1);
    assert_eq!(pagination.total_items, 1);
    assert_eq!(pagination.per_page, 10);
}

#[tokio::test]
async fn test_loading_flag_spans_the_request() {
    let s = session();
    let reply = s.mock.on(Method::Get, "/developers").defer();

    // 1. Start without awaiting the outcome
    let invocation = s
        .developers
        .inner()
        .invoke(OperationKind::List, json!({}))
        .unwrap();
    assert!(s.developers.is_loading().await.unwrap());
    assert_eq!(s.developers.error().await.unwrap(), None);

    // 2. Complete it
    reply.succeed(json!([{"id": 1}, {"id": 2}]));
    invocation.outcome().await.unwrap();
    assert!(!s.developers.is_loading().await.unwrap());
    assert_eq!(s.developers.items().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_prepends_and_delete_removes() {
    let s = session();
    s.mock.on(Method::Get, "/developers").reply(json!([{"id": 1}]));
    s.mock
        .on(Method::Post, "/developers")
        .with_body(json!({"developer_name": "New"}))
        .reply(json!({"data": {"id": 9, "developer_name": "New"}}));
    s.mock.on(Method::Delete, "/developers/1").reply(json!({"message": "Deleted"}));

    s.developers.list(json!({})).await.unwrap();

    // 1. Create sends external names and returns the canonical record
    let created = s
        .developers
        .inner()
        .create(&json!({"name": "New"}))
        .await
        .unwrap();
    assert_eq!(created.name, "New");
    let ids: Vec<_> = s
        .developers
        .items()
        .await
        .unwrap()
        .iter()
        .map(|d| d.id().clone())
        .collect();
    assert_eq!(ids, vec![ResourceId::Int(9), ResourceId::Int(1)]);
    assert_eq!(s.developers.pagination().await.unwrap().total_items, 2);

    // 2. Delete removes exactly one entry
    s.developers.delete(ResourceId::Int(1)).await.unwrap();
    let items = s.developers.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id(), &ResourceId::Int(9));
    assert_eq!(s.developers.pagination().await.unwrap().total_items, 1);
    s.mock.verify();
}

#[tokio::test]
async fn test_validation_failure_populates_field_errors() {
    let s = session();
    s.mock.on(Method::Post, "/developers").fail(RequestError::from_response(
        422,
        &json!({
            "message": "The given data was invalid.",
            "errors": {"developer_name": ["The developer name field is required."]}
        }),
    ));

    let result = s.developers.inner().create(&json!({"name": ""})).await;
    assert!(matches!(
        result,
        Err(FrameworkError::Request(RequestError::Validation { .. }))
    ));

    let expected = BTreeMap::from([(
        "developer_name".to_owned(),
        "The developer name field is required.".to_owned(),
    )]);
    assert_eq!(s.developers.validation_errors().await.unwrap(), Some(expected));
    assert_eq!(
        s.developers.error().await.unwrap().as_deref(),
        Some("The given data was invalid.")
    );
    assert!(s.developers.items().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_last_list_request_wins() {
    let s = session();
    let page_one = s
        .mock
        .on(Method::Get, "/developers")
        .with_query(json!({"page": 1}))
        .defer();
    let page_two = s
        .mock
        .on(Method::Get, "/developers")
        .with_query(json!({"page": 2}))
        .defer();

    let first = s
        .developers
        .inner()
        .invoke(OperationKind::List, json!({"page": 1}))
        .unwrap();
    let second = s
        .developers
        .inner()
        .invoke(OperationKind::List, json!({"page": 2}))
        .unwrap();

    // The newer request completes first, the stale one afterwards
    page_two.succeed(json!({"data": [{"id": 20}], "current_page": 2, "last_page": 2}));
    second.outcome().await.unwrap();
    page_one.succeed(json!({"data": [{"id": 10}], "current_page": 1, "last_page": 2}));
    first.outcome().await.unwrap();

    let state = s.developers.snapshot().await.unwrap();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id(), &ResourceId::Int(20));
    assert_eq!(state.pagination.current_page, 2);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_status_update_merges_without_echo() {
    let s = session();
    s.mock
        .on(Method::Get, "/developers")
        .reply(json!([{"id": 3, "developer_name": "Sobha", "status": "active"}]));
    s.mock
        .on(Method::Patch, "/developers/3/status")
        .with_body(json!({"status": "inactive"}))
        .reply(json!({"message": "Status updated"}));

    s.developers.list(json!({})).await.unwrap();
    s.developers
        .inner()
        .update_status(3, &"inactive")
        .await
        .unwrap();

    let items = s.developers.items().await.unwrap();
    assert_eq!(items[0].status.as_deref(), Some("inactive"));
    assert_eq!(items[0].name, "Sobha");
    s.mock.verify();
}

#[tokio::test]
async fn test_reset_discards_late_completion() {
    let s = session();
    let reply = s.mock.on(Method::Get, "/developers").defer();

    let invocation = s
        .developers
        .inner()
        .invoke(OperationKind::List, json!({}))
        .unwrap();
    s.store.reset().await.unwrap();

    reply.succeed(json!([{"id": 1}]));
    invocation.outcome().await.unwrap();

    let state = s.developers.snapshot().await.unwrap();
    assert!(state.items.is_empty());
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_unbound_kind_is_rejected() {
    let s = session();
    let owners = ResourceClient::<Developer>::new(
        s.registry.clone(),
        ModulePath::new("crm", "owners"),
        OperationBindings::new(),
        FieldMap::identity(),
    );
    let result = owners.invoke(OperationKind::List, json!({}));
    assert!(matches!(
        result,
        Err(FrameworkError::UnboundOperation { kind: OperationKind::List, .. })
    ));
}

#[tokio::test]
async fn test_shared_operation_respects_scopes() {
    let general_path = ModulePath::new("finance", "transactions");
    let report_path = ModulePath::new("reports", "expenses");
    let store = Store::builder()
        .register(
            ModuleRegistration::<Developer>::new(
                general_path.clone(),
                OperationBindings::crud("transactions"),
            )
            .with_scope(ScopeDescriptor::missing("propertyId")),
        )
        .unwrap()
        .register(
            ModuleRegistration::<Developer>::new(
                report_path.clone(),
                OperationBindings::new().bind("transactions/list", OperationKind::List),
            )
            .with_scope(
                ScopeDescriptor::has("propertyId").and(ScopeDescriptor::equals("type", "expense")),
            ),
        )
        .unwrap()
        .build();
    let (actor, handle) = StoreActor::new(store);
    tokio::spawn(actor.run());

    let mock = Arc::new(MockTransport::new());
    mock.on(Method::Get, "/transactions")
        .with_query(json!({"propertyId": 7, "type": "expense"}))
        .reply(json!({"data": [{"id": 100}], "total": 1}));
    mock.on(Method::Get, "/transactions")
        .with_query(json!({"page": 1}))
        .fail(RequestError::Network("timeout".into()));
    let registry = Arc::new(
        OperationRegistry::builder(mock.clone())
            .define_all(OperationDef::crud("transactions", "/transactions"))
            .unwrap()
            .subscribe(Arc::new(handle.clone()))
            .build(),
    );

    let name = "transactions/list".into();
    registry
        .invoke(&name, json!({"propertyId": 7, "type": "expense"}))
        .unwrap()
        .outcome()
        .await
        .unwrap();
    let failed = registry
        .invoke(&name, json!({"page": 1}))
        .unwrap()
        .outcome()
        .await;
    assert!(failed.is_err());

    let report = handle.snapshot::<Developer>(&report_path).await.unwrap();
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.error, None);
    assert!(!report.is_loading);

    let general = handle.snapshot::<Developer>(&general_path).await.unwrap();
    assert!(general.items.is_empty());
    assert_eq!(general.error.as_deref(), Some("Network error: timeout"));
}

#[tokio::test]
async fn test_facade_create_and_update() {
    let s = session();
    s.mock
        .on(Method::Get, "/developers")
        .reply(json!([{"id": 1, "developer_name": "A"}]));
    s.mock
        .on(Method::Post, "/developers")
        .with_body(json!({"developer_name": "New"}))
        .reply(json!({"data": {"id": 2, "developer_name": "New"}}));
    s.mock
        .on(Method::Put, "/developers/1")
        .with_body(json!({"developer_name": "Renamed"}))
        .reply(json!({"message": "Updated"}));

    s.developers.list(json!({})).await.unwrap();

    // 1. Create through the facade
    let created = s.developers.create(&json!({"name": "New"})).await.unwrap();
    assert_eq!(created.id(), &ResourceId::Int(2));
    assert_eq!(created.into_inner().name, "New");

    // 2. Update through the facade merges the request data
    s.developers
        .update(ResourceId::Int(1), &json!({"name": "Renamed"}))
        .await
        .unwrap();
    let state = s.developers.snapshot().await.unwrap();
    let renamed = state.find(&ResourceId::Int(1)).unwrap();
    assert_eq!(renamed.name, "Renamed");
    assert_eq!(renamed.raw["developer_name"], "Renamed");
    assert!(state.find(&ResourceId::Int(3)).is_none());

    // 3. The store-level lookup sees the same module
    let path = developers_path();
    let count = s
        .store
        .read(move |store| {
            accessor::module_state::<Developer>(store, &path).map(|state| state.items.len())
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(count, 2);
    s.mock.verify();
}

#[tokio::test]
async fn test_mutation_flags_span_their_requests() {
    let s = session();
    let create = s.mock.on(Method::Post, "/developers").defer();
    let update = s.mock.on(Method::Put, "/developers/1").defer();
    let delete = s.mock.on(Method::Delete, "/developers/1").defer();
    let client = s.developers.inner();

    // 1. Create
    let invocation = client
        .invoke(OperationKind::Create, json!({"data": {"developer_name": "New"}}))
        .unwrap();
    assert!(s.developers.is_creating().await.unwrap());
    create.succeed(json!({"data": {"id": 1, "developer_name": "New"}}));
    invocation.outcome().await.unwrap();
    assert!(!s.developers.is_creating().await.unwrap());

    // 2. Update
    let invocation = client
        .invoke(
            OperationKind::Update,
            json!({"id": 1, "data": {"developer_name": "Renamed"}}),
        )
        .unwrap();
    assert!(s.developers.is_updating().await.unwrap());
    assert!(!s.developers.is_creating().await.unwrap());
    update.succeed(json!({"message": "Updated"}));
    invocation.outcome().await.unwrap();
    assert!(!s.developers.is_updating().await.unwrap());

    // 3. Delete
    let invocation = client
        .invoke(OperationKind::Delete, json!({"id": 1}))
        .unwrap();
    assert!(s.developers.is_deleting().await.unwrap());
    delete.succeed(json!({"message": "Deleted"}));
    invocation.outcome().await.unwrap();
    assert!(!s.developers.is_deleting().await.unwrap());
    assert!(s.developers.items().await.unwrap().is_empty());
    s.mock.verify();
}

#[tokio::test]
async fn test_create_counts_even_when_id_is_cached() {
    let s = session();
    s.mock.on(Method::Get, "/developers").reply(json!({
        "data": [{"id": 1, "developer_name": "A"}],
        "total": 120
    }));
    s.mock
        .on(Method::Post, "/developers")
        .reply(json!({"data": {"id": 1, "developer_name": "Again"}}));

    s.developers.list(json!({})).await.unwrap();
    s.developers.create(&json!({"name": "Again"})).await.unwrap();

    let items = s.developers.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Again");
    assert_eq!(s.developers.pagination().await.unwrap().total_items, 121);
    s.mock.verify();
}
