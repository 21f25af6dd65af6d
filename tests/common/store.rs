//! In-memory definition store used by the service tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use flowsmith::assembler::ProcessAssembler;
use flowsmith::error::FlowError;
use flowsmith::model::ProcessGraph;
use flowsmith::service::{DefinitionHandle, DefinitionStore, DeploymentId};

const BASE_PREFIX: &str = "base:";

/// Definition store backed by two hash maps: seeded base definitions and
/// deployed group definitions keyed by graph id.
#[derive(Default)]
pub struct MemoryStore {
    bases: RefCell<HashMap<String, ProcessGraph>>,
    definitions: RefCell<HashMap<String, ProcessGraph>>,
    /// When set, `deploy` succeeds but stores nothing; lets tests drive the
    /// post-deployment integrity check.
    pub drop_deployments: Cell<bool>,
    deployment_counter: Cell<u64>,
}

impl MemoryStore {
    /// A store seeded with an empty-chain base definition for `doc_type`.
    #[allow(dead_code)]
    pub fn with_base(doc_type: &str) -> Self {
        let store = Self::default();
        let base = ProcessAssembler::default()
            .assemble_empty(doc_type, "none", "Base workflow")
            .expect("empty assembly never fails");
        store.bases.borrow_mut().insert(doc_type.to_string(), base);
        store
    }

    /// Seed a deployed definition directly, bypassing `deploy`.
    #[allow(dead_code)]
    pub fn seed_definition(&self, graph: ProcessGraph) {
        self.definitions
            .borrow_mut()
            .insert(graph.id.clone(), graph);
    }
}

impl DefinitionStore for MemoryStore {
    fn base_definition(&self, doc_type: &str) -> Result<Option<DefinitionHandle>, FlowError> {
        Ok(self
            .bases
            .borrow()
            .contains_key(doc_type)
            .then(|| DefinitionHandle::new(format!("{BASE_PREFIX}{doc_type}"))))
    }

    fn definition_exists(&self, doc_type: &str, group: &str) -> Result<bool, FlowError> {
        Ok(self
            .definitions
            .borrow()
            .contains_key(&format!("{doc_type}_{group}")))
    }

    fn find_definition(
        &self,
        doc_type: &str,
        group: &str,
    ) -> Result<Option<DefinitionHandle>, FlowError> {
        let key = format!("{doc_type}_{group}");
        Ok(self
            .definitions
            .borrow()
            .contains_key(&key)
            .then(|| DefinitionHandle::new(key)))
    }

    fn load_graph(&self, handle: &DefinitionHandle) -> Result<ProcessGraph, FlowError> {
        let graph = match handle.as_str().strip_prefix(BASE_PREFIX) {
            Some(doc_type) => self.bases.borrow().get(doc_type).cloned(),
            None => self.definitions.borrow().get(handle.as_str()).cloned(),
        };
        graph.ok_or_else(|| FlowError::Store {
            message: format!("no graph behind handle `{}`", handle.as_str()),
        })
    }

    fn deploy(&self, _name: &str, graph: &ProcessGraph) -> Result<DeploymentId, FlowError> {
        let id = self.deployment_counter.get() + 1;
        self.deployment_counter.set(id);
        if !self.drop_deployments.get() {
            self.definitions
                .borrow_mut()
                .insert(graph.id.clone(), graph.clone());
        }
        Ok(DeploymentId::new(format!("deployment_{id}")))
    }
}
