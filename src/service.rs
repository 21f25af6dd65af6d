//! Workflow orchestration over external collaborators.
//!
//! The core never persists anything itself. Lookup, storage, and deployment
//! belong to a [`DefinitionStore`] implementation supplied by the caller;
//! visual layout belongs to a [`GraphLayout`]. [`WorkflowService`] stitches
//! the pure graph operations together with those collaborators: precondition
//! checks, build, splice, deploy, and a defensive post-deploy lookup.
//!
//! Concurrency control around these collaborators (for example, preventing
//! two concurrent builds for the same key) is the caller's responsibility.

use tracing::info;

use crate::assembler::{AssemblerConfig, ProcessAssembler};
use crate::chain::build_task_chain;
use crate::contract::{DYNAMIC_SUBPROCESS_ID, ERROR_CODE_REJECTED};
use crate::error::FlowError;
use crate::model::ProcessGraph;
use crate::splice::splice_subgraph;
use crate::tasks::{TaskDescriptor, descriptors_from};

/// Opaque handle to a stored process definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DefinitionHandle(String);

impl DefinitionHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque identifier returned by a successful deployment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeploymentId(String);

impl DeploymentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// External definition lookup, retrieval, and deployment.
///
/// Implementations own all persistence; this crate only consumes the
/// interface.
pub trait DefinitionStore {
    /// Handle of the base definition for a doc type, if one exists.
    fn base_definition(&self, doc_type: &str) -> Result<Option<DefinitionHandle>, FlowError>;

    /// Whether a definition exists for the doc type / group pair.
    fn definition_exists(&self, doc_type: &str, group: &str) -> Result<bool, FlowError>;

    /// Handle of the definition for a doc type / group pair, if one exists.
    fn find_definition(
        &self,
        doc_type: &str,
        group: &str,
    ) -> Result<Option<DefinitionHandle>, FlowError>;

    /// Load the process graph behind a handle.
    fn load_graph(&self, handle: &DefinitionHandle) -> Result<ProcessGraph, FlowError>;

    /// Deploy a graph under a deployment name.
    fn deploy(&self, name: &str, graph: &ProcessGraph) -> Result<DeploymentId, FlowError>;
}

/// Cosmetic layout collaborator: adds visual coordinates.
///
/// The core never depends on its output beyond passing the graph along.
pub trait GraphLayout {
    fn layout(&self, graph: ProcessGraph) -> ProcessGraph;
}

/// Layout that changes nothing; the default collaborator.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLayout;

impl GraphLayout for NoLayout {
    fn layout(&self, graph: ProcessGraph) -> ProcessGraph {
        graph
    }
}

/// Orchestrates creation, update, and read-back of group workflows.
///
/// # Examples
///
/// ```no_run
/// use flowsmith::assembler::AssemblerConfig;
/// use flowsmith::service::{DefinitionStore, WorkflowService};
/// use flowsmith::tasks::{TaskDescriptor, TaskKind};
///
/// fn run(store: impl DefinitionStore) -> Result<(), flowsmith::error::FlowError> {
///     let service = WorkflowService::new(store, AssemblerConfig::default());
///     service.create_group_workflow("contract", "emea")?;
///
///     let tasks = vec![TaskDescriptor::new(TaskKind::Approval).with_candidate_group("legal")];
///     service.update_dynamic_tasks("contract", "emea", &tasks)?;
///     Ok(())
/// }
/// ```
pub struct WorkflowService<S, L = NoLayout> {
    store: S,
    layout: L,
    assembler: ProcessAssembler,
}

impl<S: DefinitionStore> WorkflowService<S> {
    /// A service over `store` with no layout collaborator.
    pub fn new(store: S, config: AssemblerConfig) -> Self {
        Self {
            store,
            layout: NoLayout,
            assembler: ProcessAssembler::new(config),
        }
    }
}

impl<S: DefinitionStore, L: GraphLayout> WorkflowService<S, L> {
    /// Swap in a layout collaborator.
    #[must_use]
    pub fn with_layout<L2: GraphLayout>(self, layout: L2) -> WorkflowService<S, L2> {
        WorkflowService {
            store: self.store,
            layout,
            assembler: self.assembler,
        }
    }

    /// Create a new group workflow cloned from the doc type's base definition.
    ///
    /// # Errors
    ///
    /// - [`FlowError::MissingBaseDefinition`] if the doc type has no base.
    /// - [`FlowError::DefinitionExists`] if the group workflow already exists.
    /// - [`FlowError::EmptyDefinition`] if the post-deploy lookup comes back
    ///   empty.
    pub fn create_group_workflow(
        &self,
        doc_type: &str,
        group: &str,
    ) -> Result<DefinitionHandle, FlowError> {
        let key = self.assembler.process_key(doc_type, group);
        info!(%doc_type, %group, %key, "creating group workflow");

        let base = self
            .store
            .base_definition(doc_type)?
            .ok_or_else(|| FlowError::MissingBaseDefinition {
                doc_type: doc_type.to_string(),
            })?;
        if self.store.definition_exists(doc_type, group)? {
            return Err(FlowError::DefinitionExists { key });
        }

        let mut graph = self.store.load_graph(&base)?;
        graph.id = key.clone();
        graph.name = Some(format!("{doc_type} for group {group}"));
        graph.namespace = self.assembler.config().namespace.clone();

        let graph = self.layout.layout(graph);
        self.store
            .deploy(&format!("Dynamic Process Deployment - {key}"), &graph)?;

        self.store
            .find_definition(doc_type, group)?
            .ok_or(FlowError::EmptyDefinition { key })
    }

    /// Replace the dynamic task chain of an existing group workflow.
    ///
    /// Builds a fresh chain from `tasks`, splices it into the stored graph,
    /// and redeploys. The old chain is discarded wholesale; partial mutation
    /// is never performed.
    ///
    /// # Errors
    ///
    /// - [`FlowError::DefinitionMissing`] if the group workflow does not
    ///   exist.
    /// - Chain validation and splice structural errors, propagated as-is.
    /// - [`FlowError::EmptyDefinition`] if the post-deploy lookup comes back
    ///   empty.
    pub fn update_dynamic_tasks(
        &self,
        doc_type: &str,
        group: &str,
        tasks: &[TaskDescriptor],
    ) -> Result<DefinitionHandle, FlowError> {
        let key = self.assembler.process_key(doc_type, group);
        info!(%doc_type, %group, %key, tasks = tasks.len(), "updating dynamic tasks");

        if !self.store.definition_exists(doc_type, group)? {
            return Err(FlowError::DefinitionMissing { key });
        }
        let handle = self
            .store
            .find_definition(doc_type, group)?
            .ok_or_else(|| FlowError::DefinitionMissing { key: key.clone() })?;

        let current = self.store.load_graph(&handle)?;
        let chain = build_task_chain(tasks, ERROR_CODE_REJECTED)?;
        let updated = splice_subgraph(&current, DYNAMIC_SUBPROCESS_ID, chain)?;

        let updated = self.layout.layout(updated);
        self.store
            .deploy(&format!("Dynamic Process Deployment - {key}"), &updated)?;

        self.store
            .find_definition(doc_type, group)?
            .ok_or(FlowError::EmptyDefinition { key })
    }

    /// Read the ordered task descriptors out of a stored definition.
    ///
    /// # Errors
    ///
    /// [`FlowError::SubgraphNotFound`] if the loaded graph has no dynamic
    /// subprocess.
    pub fn dynamic_tasks(
        &self,
        handle: &DefinitionHandle,
    ) -> Result<Vec<TaskDescriptor>, FlowError> {
        let graph = self.store.load_graph(handle)?;
        let sub = graph
            .subprocess(DYNAMIC_SUBPROCESS_ID)
            .ok_or_else(|| FlowError::SubgraphNotFound {
                id: DYNAMIC_SUBPROCESS_ID.to_string(),
            })?;
        Ok(descriptors_from(sub))
    }

    /// The assembler this service wires graphs with.
    #[must_use]
    pub fn assembler(&self) -> &ProcessAssembler {
        &self.assembler
    }
}
