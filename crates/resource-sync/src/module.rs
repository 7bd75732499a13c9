//! # Resource Module
//!
//! A `ResourceModule<T>` is the state container for one entity type. It never talks
//! to the network: it only reacts to [`OperationEvent`]s that the store routes to
//! it, and applies the standard mutation contract for the bound operation kind.
//!
//! ## Mutation contract
//!
//! | Kind | Started | Succeeded | Failed |
//! |------|---------|-----------|--------|
//! | `List` | `is_loading`, clear `error` | replace `items` + `pagination` | set `error` |
//! | `Get` | `is_loading`, clear `error` | set `current_item` | set `error` |
//! | `Create` | `is_creating`, clear `error` + `validation_errors` | prepend, `total_items += 1` | set `error` / `validation_errors` |
//! | `Update` | `is_updating`, clear `error` + `validation_errors` | replace entry and `current_item` by id | set `error` / `validation_errors` |
//! | `StatusUpdate` | same as `Update` | same as `Update` | same as `Update` |
//! | `Delete` | `is_deleting`, clear `error` | remove entry, `total_items - 1` (floor 0), clear `current_item` | set `error` |
//!
//! A failure never touches `items`, `current_item` or `pagination`.
//!
//! ## In-flight bookkeeping
//!
//! The module records every request id it saw start, with its kind. The four flags
//! are derived from that set, so a list refresh and a row delete can be in flight
//! together without one clearing the other's flag.
//!
//! - A terminal event whose request id the module never saw start is ignored.
//!   After [`Module::reset`] this drops the late completions of the old session.
//! - `List` and `Get` replace state wholesale, so only the newest invocation of
//!   each may commit. An older one that finishes later is dropped.
//!
//! ## Scoping
//!
//! When the registration carries a [`ScopeDescriptor`], every phase of every bound
//! event is first checked against the call arguments. A miss is a no-op.

use serde_json::{Map, Value};
use std::any::Any;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

use crate::entity::ResourceEntity;
use crate::error::{FrameworkError, RequestError};
use crate::field_map::{canonicalize, FieldMap};
use crate::id::ResourceId;
use crate::normalize::{extract_item, normalize};
use crate::operation::{
    operation_name, OperationEvent, OperationKind, OperationName, Phase, RequestId,
};
use crate::scope::ScopeDescriptor;
use crate::state::{Canonical, ResourceState};
use crate::store::ModulePath;

/// Which operations a module reacts to, and as which kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationBindings {
    by_name: HashMap<OperationName, OperationKind>,
    by_kind: HashMap<OperationKind, OperationName>,
}

impl OperationBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the five conventional `"<resource>/<kind>"` operations.
    pub fn crud(resource: &str) -> Self {
        [
            OperationKind::List,
            OperationKind::Get,
            OperationKind::Create,
            OperationKind::Update,
            OperationKind::Delete,
        ]
        .into_iter()
        .fold(Self::new(), |bindings, kind| {
            bindings.bind(operation_name(resource, kind), kind)
        })
    }

    /// Adds the conventional `"<resource>/updateStatus"` binding.
    pub fn with_status(self, resource: &str) -> Self {
        self.bind(
            operation_name(resource, OperationKind::StatusUpdate),
            OperationKind::StatusUpdate,
        )
    }

    pub fn bind(mut self, name: impl Into<OperationName>, kind: OperationKind) -> Self {
        let name = name.into();
        self.by_kind.insert(kind, name.clone());
        self.by_name.insert(name, kind);
        self
    }

    pub fn kind_of(&self, name: &OperationName) -> Option<OperationKind> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, kind: OperationKind) -> Option<&OperationName> {
        self.by_kind.get(&kind)
    }

    pub fn names(&self) -> impl Iterator<Item = &OperationName> {
        self.by_name.keys()
    }
}

/// Everything the root composition needs to create one module.
#[derive(Debug, Clone)]
pub struct ModuleRegistration<T> {
    pub path: ModulePath,
    pub initial_state: ResourceState<T>,
    pub bindings: OperationBindings,
    pub field_map: FieldMap,
    pub scope: Option<ScopeDescriptor>,
}

impl<T: ResourceEntity> ModuleRegistration<T> {
    pub fn new(path: ModulePath, bindings: OperationBindings) -> Self {
        Self {
            path,
            initial_state: ResourceState::default(),
            bindings,
            field_map: FieldMap::identity(),
            scope: None,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.initial_state = ResourceState::with_per_page(per_page);
        self
    }

    pub fn with_field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = field_map;
        self
    }

    pub fn with_scope(mut self, scope: ScopeDescriptor) -> Self {
        self.scope = Some(scope);
        self
    }
}

/// Type-erased module, as held by the [`Store`](crate::store::Store).
pub trait Module: Send + 'static {
    fn path(&self) -> &ModulePath;

    fn bindings(&self) -> &OperationBindings;

    /// Applies one lifecycle event. Returns `true` when module state was mutated.
    fn handle(&mut self, event: &OperationEvent) -> bool;

    /// Restores the initial state and forgets every in-flight request.
    fn reset(&mut self);

    fn as_any(&self) -> &dyn Any;
}

enum Settlement {
    Current,
    Superseded,
    Unknown,
}

/// State container bound to one entity type.
pub struct ResourceModule<T: ResourceEntity> {
    path: ModulePath,
    bindings: OperationBindings,
    field_map: FieldMap,
    scope: ScopeDescriptor,
    initial: ResourceState<T>,
    state: ResourceState<T>,
    pending: HashMap<RequestId, OperationKind>,
    latest: HashMap<OperationKind, RequestId>,
}

impl<T: ResourceEntity> ResourceModule<T> {
    pub fn new(registration: ModuleRegistration<T>) -> Self {
        Self {
            path: registration.path,
            bindings: registration.bindings,
            field_map: registration.field_map,
            scope: registration.scope.unwrap_or_default(),
            state: registration.initial_state.clone(),
            initial: registration.initial_state,
            pending: HashMap::new(),
            latest: HashMap::new(),
        }
    }

    pub fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    pub fn field_map(&self) -> &FieldMap {
        &self.field_map
    }

    fn on_started(&mut self, kind: OperationKind, request_id: RequestId) {
        self.pending.insert(request_id, kind);
        if kind.is_replacing() {
            self.latest.insert(kind, request_id);
        }
        self.state.error = None;
        if matches!(
            kind,
            OperationKind::Create | OperationKind::Update | OperationKind::StatusUpdate
        ) {
            self.state.validation_errors = None;
        }
    }

    fn settle(&mut self, kind: OperationKind, request_id: RequestId) -> Settlement {
        if self.pending.remove(&request_id).is_none() {
            return Settlement::Unknown;
        }
        if kind.is_replacing() && self.latest.get(&kind) != Some(&request_id) {
            return Settlement::Superseded;
        }
        Settlement::Current
    }

    fn refresh_flags(&mut self) {
        let in_flight =
            |kinds: &[OperationKind]| self.pending.values().any(|kind| kinds.contains(kind));
        let is_loading = in_flight(&[OperationKind::List, OperationKind::Get]);
        let is_creating = in_flight(&[OperationKind::Create]);
        let is_updating = in_flight(&[OperationKind::Update, OperationKind::StatusUpdate]);
        let is_deleting = in_flight(&[OperationKind::Delete]);

        self.state.is_loading = is_loading;
        self.state.is_creating = is_creating;
        self.state.is_updating = is_updating;
        self.state.is_deleting = is_deleting;
    }

    fn on_succeeded(&mut self, kind: OperationKind, args: &Value, payload: &Value) {
        let result = match kind {
            OperationKind::List => {
                self.apply_list(payload);
                Ok(())
            }
            OperationKind::Get => self.apply_get(payload),
            OperationKind::Create => self.apply_create(payload),
            OperationKind::Update | OperationKind::StatusUpdate => {
                self.apply_update(kind, args, payload)
            }
            OperationKind::Delete => {
                self.apply_delete(args);
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!(module = %self.path, ?kind, error = %e, "Response not applied");
            self.state.error = Some(e.to_string());
        }
    }

    fn on_failed(&mut self, error: &RequestError) {
        self.state.error = Some(error.to_string());
        if let Some(fields) = error.validation_errors() {
            self.state.validation_errors = Some(fields.clone());
        }
    }

    fn apply_list(&mut self, payload: &Value) {
        let page = normalize(payload, self.initial.default_per_page());
        let mut items: Vec<Canonical<T>> = Vec::with_capacity(page.items.len());
        for raw in &page.items {
            match canonicalize::<T>(raw, &self.field_map) {
                Ok(item) if items.iter().any(|seen| seen.id() == item.id()) => {
                    debug!(module = %self.path, id = %item.id(), "Duplicate list item dropped");
                }
                Ok(item) => items.push(item),
                Err(e) => warn!(module = %self.path, error = %e, "Skipping undecodable item"),
            }
        }
        self.state.items = items;
        self.state.pagination = page.pagination;
    }

    fn apply_get(&mut self, payload: &Value) -> Result<(), FrameworkError> {
        let item = self.decode_record(payload)?;
        self.state.current_item = Some(item);
        Ok(())
    }

    fn apply_create(&mut self, payload: &Value) -> Result<(), FrameworkError> {
        let item = self.decode_record(payload)?;
        if let Some(index) = self.state.position_of(item.id()) {
            self.state.items.remove(index);
        }
        self.state.items.insert(0, item);
        self.state.pagination.total_items += 1;
        Ok(())
    }

    fn apply_update(
        &mut self,
        kind: OperationKind,
        args: &Value,
        payload: &Value,
    ) -> Result<(), FrameworkError> {
        let target = args.get("id").and_then(ResourceId::from_value);

        if extract_item(payload).is_some() {
            let item = self.decode_record(payload)?;
            let id = target.unwrap_or_else(|| item.id().clone());
            if let Some(index) = self.state.position_of(&id) {
                self.state.items[index] = item.clone();
            }
            if self.state.current_item.as_ref().is_some_and(|c| c.id() == &id) {
                self.state.current_item = Some(item);
            }
            return Ok(());
        }

        // No record echoed back: apply the request data locally.
        let Some(id) = target else {
            return Ok(());
        };
        let patch = match kind {
            OperationKind::StatusUpdate => {
                let mut patch = Map::new();
                patch.insert(
                    T::STATUS_FIELD.to_owned(),
                    args.get("status").cloned().unwrap_or(Value::Null),
                );
                Value::Object(patch)
            }
            _ => self
                .field_map
                .to_internal(args.get("data").unwrap_or(&Value::Null)),
        };
        let Value::Object(patch) = patch else {
            return Ok(());
        };
        let raw_patch = self.field_map.to_external(&Value::Object(patch.clone()));

        if let Some(index) = self.state.position_of(&id) {
            self.state.items[index] = merge(&self.state.items[index], &patch, &raw_patch)?;
        }
        let merged_current = match &self.state.current_item {
            Some(current) if current.id() == &id => Some(merge(current, &patch, &raw_patch)?),
            _ => None,
        };
        if merged_current.is_some() {
            self.state.current_item = merged_current;
        }
        Ok(())
    }

    fn apply_delete(&mut self, args: &Value) {
        if let Some(id) = args.get("id").and_then(ResourceId::from_value) {
            if let Some(index) = self.state.position_of(&id) {
                self.state.items.remove(index);
            }
            if self.state.current_item.as_ref().is_some_and(|c| c.id() == &id) {
                self.state.current_item = None;
            }
        }
        self.state.pagination.total_items = self.state.pagination.total_items.saturating_sub(1);
    }

    fn decode_record(&self, payload: &Value) -> Result<Canonical<T>, FrameworkError> {
        let raw = extract_item(payload)
            .ok_or_else(|| FrameworkError::Decode("response carried no record".into()))?;
        canonicalize::<T>(raw, &self.field_map)
    }
}

fn merge<T: ResourceEntity>(
    entry: &Canonical<T>,
    patch: &Map<String, Value>,
    raw_patch: &Value,
) -> Result<Canonical<T>, FrameworkError> {
    let mut value =
        serde_json::to_value(&entry.value).map_err(|e| FrameworkError::Decode(e.to_string()))?;
    if let Value::Object(fields) = &mut value {
        fields.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    let value =
        serde_json::from_value::<T>(value).map_err(|e| FrameworkError::Decode(e.to_string()))?;

    let mut raw = entry.raw.clone();
    if let (Value::Object(raw_fields), Value::Object(patch_fields)) = (&mut raw, raw_patch) {
        raw_fields.extend(patch_fields.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    Ok(Canonical::new(value, raw))
}

impl<T: ResourceEntity> Module for ResourceModule<T> {
    fn path(&self) -> &ModulePath {
        &self.path
    }

    fn bindings(&self) -> &OperationBindings {
        &self.bindings
    }

    fn handle(&mut self, event: &OperationEvent) -> bool {
        let Some(kind) = self.bindings.kind_of(&event.operation) else {
            return false;
        };
        if !self.scope.matches(&event.args) {
            trace!(module = %self.path, operation = %event.operation, "Scope miss");
            return false;
        }

        let request_id = event.request_id;
        let applied = match &event.phase {
            Phase::Started => {
                self.on_started(kind, request_id);
                true
            }
            Phase::Succeeded(payload) => match self.settle(kind, request_id) {
                Settlement::Current => {
                    self.on_succeeded(kind, &event.args, payload);
                    true
                }
                Settlement::Superseded => {
                    debug!(module = %self.path, %request_id, "Superseded response dropped");
                    false
                }
                Settlement::Unknown => {
                    debug!(module = %self.path, %request_id, "Stale terminal ignored");
                    return false;
                }
            },
            Phase::Failed(error) => match self.settle(kind, request_id) {
                Settlement::Current => {
                    self.on_failed(error);
                    true
                }
                Settlement::Superseded => {
                    debug!(module = %self.path, %request_id, "Superseded failure dropped");
                    false
                }
                Settlement::Unknown => {
                    debug!(module = %self.path, %request_id, "Stale terminal ignored");
                    return false;
                }
            },
        };

        self.refresh_flags();
        if applied {
            debug!(
                module = %self.path,
                operation = %event.operation,
                %request_id,
                items = self.state.items.len(),
                "Applied"
            );
        }
        applied
    }

    fn reset(&mut self) {
        self.state = self.initial.clone();
        self.pending.clear();
        self.latest.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Lead {
        id: ResourceId,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        status: Option<String>,
    }

    impl ResourceEntity for Lead {
        fn id(&self) -> &ResourceId {
            &self.id
        }
    }

    fn module() -> ResourceModule<Lead> {
        ResourceModule::new(
            ModuleRegistration::new(
                ModulePath::new("crm", "leads"),
                OperationBindings::crud("leads").with_status("leads"),
            )
            .with_per_page(25)
            .with_field_map(FieldMap::new(&[
                ("lead_name", "name"),
                ("lead_status", "status"),
            ])),
        )
    }

    fn event(operation: &str, id: u64, args: Value, phase: Phase) -> OperationEvent {
        OperationEvent {
            operation: operation.into(),
            request_id: RequestId(id),
            args: Arc::new(args),
            phase,
        }
    }

    fn ok(payload: Value) -> Phase {
        Phase::Succeeded(Arc::new(payload))
    }

    /// Runs Started then the given terminal phase for one invocation.
    fn run(module: &mut ResourceModule<Lead>, operation: &str, id: u64, args: Value, end: Phase) {
        module.handle(&event(operation, id, args.clone(), Phase::Started));
        module.handle(&event(operation, id, args, end));
    }

    fn ids(module: &ResourceModule<Lead>) -> Vec<ResourceId> {
        module.state().items.iter().map(|i| i.id().clone()).collect()
    }

    #[test]
    fn test_list_replaces_items_and_pagination() {
        let mut leads = module();
        run(
            &mut leads,
            "leads/list",
            1,
            json!({"page": 1}),
            ok(json!({
                "data": [{"id": 1, "lead_name": "A"}],
                "current_page": 1, "last_page": 3, "total": 120, "per_page": 50
            })),
        );

        let state = leads.state();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].name.as_deref(), Some("A"));
        assert_eq!(state.items[0].raw["lead_name"], "A");
        assert_eq!(state.pagination.total_pages, 3);
        assert_eq!(state.pagination.total_items, 120);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_flat_list_uses_module_per_page() {
        let mut leads = module();
        run(&mut leads, "leads/list", 1, json!({}), ok(json!([{"id": 2}])));
        let pagination = leads.state().pagination;
        assert_eq!(pagination.current_page, 1);
        assert_eq!(pagination.total_pages, 1);
        assert_eq!(pagination.total_items, 1);
        assert_eq!(pagination.per_page, 25);
    }

    #[test]
    fn test_create_prepends_and_counts_every_success() {
        let mut leads = module();
        run(&mut leads, "leads/list", 1, json!({}), ok(json!([{"id": 1}])));

        run(
            &mut leads,
            "leads/create",
            2,
            json!({"data": {"lead_name": "New"}}),
            ok(json!({"data": {"id": 9, "lead_name": "New"}})),
        );
        assert_eq!(ids(&leads), vec![ResourceId::Int(9), ResourceId::Int(1)]);
        assert_eq!(leads.state().pagination.total_items, 2);

        // Same id echoed again: moved to the front without a duplicate, still counted
        let echoed = ok(json!({"data": {"id": "1"}}));
        run(&mut leads, "leads/create", 3, json!({}), echoed);
        assert_eq!(ids(&leads), vec![ResourceId::Int(1), ResourceId::Int(9)]);
        assert_eq!(leads.state().pagination.total_items, 3);
    }

    #[test]
    fn test_delete_removes_one_and_never_goes_negative() {
        let mut leads = module();
        run(&mut leads, "leads/list", 1, json!({}), ok(json!([{"id": 1}, {"id": 2}])));
        run(&mut leads, "leads/get", 2, json!({"id": 1}), ok(json!({"data": {"id": 1}})));

        let deleted = ok(json!({"message": "Deleted"}));
        run(&mut leads, "leads/delete", 3, json!({"id": 1}), deleted);
        assert_eq!(ids(&leads), vec![ResourceId::Int(2)]);
        assert_eq!(leads.state().pagination.total_items, 1);
        assert!(leads.state().current_item.is_none());

        run(&mut leads, "leads/delete", 4, json!({"id": 42}), ok(json!(null)));
        run(&mut leads, "leads/delete", 5, json!({"id": 43}), ok(json!(null)));
        assert_eq!(ids(&leads), vec![ResourceId::Int(2)]);
        assert_eq!(leads.state().pagination.total_items, 0);
    }

    #[test]
    fn test_started_clears_error() {
        let mut leads = module();
        run(
            &mut leads,
            "leads/list",
            1,
            json!({}),
            Phase::Failed(RequestError::Network("connection refused".into())),
        );
        assert_eq!(
            leads.state().error.as_deref(),
            Some("Network error: connection refused")
        );

        leads.handle(&event("leads/list", 2, json!({}), Phase::Started));
        assert!(leads.state().error.is_none());
        assert!(leads.state().is_loading);
    }

    #[test]
    fn test_get_started_clears_error() {
        let mut leads = module();
        run(
            &mut leads,
            "leads/get",
            1,
            json!({"id": 5}),
            Phase::Failed(RequestError::NotFound("Lead not found".into())),
        );
        assert_eq!(leads.state().error.as_deref(), Some("Lead not found"));

        leads.handle(&event("leads/get", 2, json!({"id": 6}), Phase::Started));
        assert!(leads.state().error.is_none());
        assert!(leads.state().is_loading);

        let found = ok(json!({"data": {"id": 6}}));
        leads.handle(&event("leads/get", 2, json!({"id": 6}), found));
        assert!(leads.state().error.is_none());
        let current = leads.state().current_item.as_ref().map(|c| c.id().clone());
        assert_eq!(current, Some(ResourceId::Int(6)));
    }

    #[test]
    fn test_validation_errors_cleared_on_next_create() {
        let mut leads = module();
        let fields = BTreeMap::from([("lead_name".to_owned(), "Required".to_owned())]);
        run(
            &mut leads,
            "leads/create",
            1,
            json!({"data": {}}),
            Phase::Failed(RequestError::Validation {
                message: "The given data was invalid.".into(),
                fields: fields.clone(),
            }),
        );
        assert_eq!(leads.state().validation_errors, Some(fields));
        assert!(leads.state().items.is_empty());

        leads.handle(&event("leads/create", 2, json!({}), Phase::Started));
        assert!(leads.state().validation_errors.is_none());
        assert!(leads.state().is_creating);
    }

    #[test]
    fn test_failure_leaves_items_untouched() {
        let mut leads = module();
        run(&mut leads, "leads/list", 1, json!({}), ok(json!([{"id": 1}])));
        run(
            &mut leads,
            "leads/list",
            2,
            json!({"page": 2}),
            Phase::Failed(RequestError::NotFound("Resource not found".into())),
        );
        assert_eq!(ids(&leads), vec![ResourceId::Int(1)]);
        assert_eq!(leads.state().error.as_deref(), Some("Resource not found"));
    }

    #[test]
    fn test_last_list_request_wins() {
        let mut leads = module();
        leads.handle(&event("leads/list", 1, json!({"page": 1}), Phase::Started));
        leads.handle(&event("leads/list", 2, json!({"page": 2}), Phase::Started));

        // 1. The newer request lands first
        leads.handle(&event("leads/list", 2, json!({"page": 2}), ok(json!([{"id": 20}]))));
        assert!(leads.state().is_loading);

        // 2. The older one is dropped but its flag is released
        let late = event("leads/list", 1, json!({"page": 1}), ok(json!([{"id": 10}])));
        assert!(!leads.handle(&late));
        assert_eq!(ids(&leads), vec![ResourceId::Int(20)]);
        assert!(!leads.state().is_loading);
    }

    #[test]
    fn test_flags_are_independent() {
        let mut leads = module();
        leads.handle(&event("leads/list", 1, json!({}), Phase::Started));
        leads.handle(&event("leads/delete", 2, json!({"id": 1}), Phase::Started));
        assert!(leads.state().is_loading && leads.state().is_deleting);

        leads.handle(&event("leads/delete", 2, json!({"id": 1}), ok(json!(null))));
        assert!(leads.state().is_loading);
        assert!(!leads.state().is_deleting);
    }

    #[test]
    fn test_update_replaces_entry_and_current_item() {
        let mut leads = module();
        let old = json!({"id": 1, "lead_name": "Old"});
        run(&mut leads, "leads/list", 1, json!({}), ok(json!([old, {"id": 2}])));
        run(&mut leads, "leads/get", 2, json!({"id": 1}), ok(json!({ "data": old })));

        run(
            &mut leads,
            "leads/update",
            3,
            json!({"id": 1, "data": {"lead_name": "Renamed"}}),
            ok(json!({"data": {"id": 1, "lead_name": "Renamed"}})),
        );
        assert_eq!(leads.state().items[0].name.as_deref(), Some("Renamed"));
        assert_eq!(
            leads.state().current_item.as_ref().and_then(|c| c.name.as_deref()),
            Some("Renamed")
        );
        assert_eq!(leads.state().items.len(), 2);
    }

    #[test]
    fn test_status_update_without_record_merges_locally() {
        let mut leads = module();
        let listed = json!([{"id": 1, "lead_status": "new"}]);
        run(&mut leads, "leads/list", 1, json!({}), ok(listed));

        run(
            &mut leads,
            "leads/updateStatus",
            2,
            json!({"id": 1, "status": "qualified"}),
            ok(json!({"message": "Status updated"})),
        );
        let lead = &leads.state().items[0];
        assert_eq!(lead.status.as_deref(), Some("qualified"));
        assert_eq!(lead.raw["lead_status"], "qualified");
        assert!(!leads.state().is_updating);
    }

    #[test]
    fn test_undecodable_record_sets_error() {
        let mut leads = module();
        run(&mut leads, "leads/get", 1, json!({"id": 5}), ok(json!({"message": "ok"})));
        assert!(leads.state().current_item.is_none());
        assert!(leads.state().error.is_some());
    }

    #[test]
    fn test_reset_drops_late_terminals() {
        let mut leads = module();
        leads.handle(&event("leads/list", 1, json!({}), Phase::Started));
        leads.reset();
        assert!(!leads.state().is_loading);

        assert!(!leads.handle(&event("leads/list", 1, json!({}), ok(json!([{"id": 1}])))));
        assert!(leads.state().items.is_empty());
        assert_eq!(leads.state().pagination.per_page, 25);
    }

    #[test]
    fn test_scope_miss_is_noop() {
        let mut report = ResourceModule::<Lead>::new(
            ModuleRegistration::new(
                ModulePath::new("reports", "leads"),
                OperationBindings::new().bind("leads/list", OperationKind::List),
            )
            .with_scope(ScopeDescriptor::has("ownerId")),
        );
        assert!(!report.handle(&event("leads/list", 1, json!({}), Phase::Started)));
        assert!(!report.state().is_loading);
        let unbound = event("leads/create", 2, json!({"ownerId": 1}), Phase::Started);
        assert!(!report.handle(&unbound));
        let scoped = event("leads/list", 3, json!({"ownerId": 1}), Phase::Started);
        assert!(report.handle(&scoped));
    }
}
