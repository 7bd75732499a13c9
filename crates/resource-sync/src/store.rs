//! # Root Composition
//!
//! The [`Store`] is the single composed state of a session: every resource module,
//! registered once, addressed by a two-level [`ModulePath`] (`domain/name`).
//!
//! ```text
//! Store
//! ├── catalog/developers   ResourceModule<Developer>
//! ├── catalog/projects     ResourceModule<Project>
//! ├── crm/leads            ResourceModule<Lead>
//! ├── finance/transactions ResourceModule<Transaction>  scope: Missing(propertyId)
//! └── reports/expenses     ResourceModule<Transaction>  scope: Has(propertyId) ∧ type = expense
//! ```
//!
//! Registration happens once, through [`StoreBuilder`]. After that the set of
//! modules is fixed: [`Store::reset`] restores every module's initial state but
//! never adds or removes one.
//!
//! The store itself is plain data with `&mut self` methods. Concurrency comes from
//! the [`StoreActor`](crate::actor::StoreActor), which owns it in one task.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Display};
use tracing::info;

use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::module::{Module, ModuleRegistration, ResourceModule};
use crate::operation::{OperationEvent, OperationName};
use crate::state::ResourceState;

/// Address of a module in the namespace tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModulePath {
    pub domain: String,
    pub name: String,
}

impl ModulePath {
    pub fn new(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            name: name.into(),
        }
    }
}

impl Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.name)
    }
}

/// One-time registration of every module of a session.
#[derive(Default)]
pub struct StoreBuilder {
    modules: Vec<Box<dyn Module>>,
    index: HashMap<ModulePath, usize>,
}

impl StoreBuilder {
    pub fn register<T: ResourceEntity>(
        mut self,
        registration: ModuleRegistration<T>,
    ) -> Result<Self, FrameworkError> {
        if self.index.contains_key(&registration.path) {
            return Err(FrameworkError::DuplicateModule(registration.path.to_string()));
        }
        let module = ResourceModule::new(registration);
        info!(
            module = %module.path(),
            operations = module.bindings().names().count(),
            "Registered"
        );
        self.index.insert(module.path().clone(), self.modules.len());
        self.modules.push(Box::new(module));
        Ok(self)
    }

    pub fn build(self) -> Store {
        let mut routes: HashMap<OperationName, Vec<usize>> = HashMap::new();
        for (position, module) in self.modules.iter().enumerate() {
            for name in module.bindings().names() {
                routes.entry(name.clone()).or_default().push(position);
            }
        }
        Store {
            modules: self.modules,
            index: self.index,
            routes,
        }
    }
}

/// The composed session state.
pub struct Store {
    modules: Vec<Box<dyn Module>>,
    index: HashMap<ModulePath, usize>,
    routes: HashMap<OperationName, Vec<usize>>,
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Routes one event to every module bound to its operation.
    ///
    /// Returns how many modules mutated their state.
    pub fn dispatch(&mut self, event: &OperationEvent) -> usize {
        let Some(targets) = self.routes.get(&event.operation) else {
            return 0;
        };
        let mut applied = 0;
        for &position in targets {
            if self.modules[position].handle(event) {
                applied += 1;
            }
        }
        applied
    }

    pub fn module<T: ResourceEntity>(
        &self,
        path: &ModulePath,
    ) -> Result<&ResourceModule<T>, FrameworkError> {
        self.index
            .get(path)
            .and_then(|&position| {
                self.modules[position]
                    .as_any()
                    .downcast_ref::<ResourceModule<T>>()
            })
            .ok_or_else(|| FrameworkError::UnknownModule(path.to_string()))
    }

    pub fn state<T: ResourceEntity>(
        &self,
        path: &ModulePath,
    ) -> Result<&ResourceState<T>, FrameworkError> {
        self.module::<T>(path).map(ResourceModule::state)
    }

    pub fn contains(&self, path: &ModulePath) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Domain names, sorted.
    pub fn domains(&self) -> Vec<&str> {
        self.modules
            .iter()
            .map(|m| m.path().domain.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Module paths of one domain, in registration order.
    pub fn modules_in(&self, domain: &str) -> Vec<&ModulePath> {
        self.modules
            .iter()
            .map(|m| m.path())
            .filter(|path| path.domain == domain)
            .collect()
    }

    /// Every operation name at least one module reacts to.
    pub fn bound_operations(&self) -> impl Iterator<Item = &OperationName> {
        self.routes.keys()
    }

    /// Restores every module to its initial state.
    pub fn reset(&mut self) {
        for module in &mut self.modules {
            module.reset();
        }
        info!(modules = self.modules.len(), "Store reset");
    }
}
