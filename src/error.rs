//! Error taxonomy for chain construction, splicing, and service orchestration.
//!
//! All variants are fatal to the current operation and non-retryable at this
//! layer: no partial graph is ever returned alongside an error, and nothing is
//! downgraded to a warning. Retries, if any, belong to the external deployment
//! collaborator.
//!
//! The variants group into four families:
//!
//! - **Precondition**: a definition the operation depends on is missing, or a
//!   definition it would create already exists.
//! - **Structural**: a loaded graph lacks the required subprocess, boundary
//!   event, or error definition, or its boundary-flow topology is unsupported.
//! - **Validation**: a task descriptor is unusable as given.
//! - **Integrity**: a defensive check after a build + lookup round trip failed.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced by graph construction, surgery, and workflow orchestration.
#[derive(Debug, Error, Diagnostic)]
pub enum FlowError {
    /// No base workflow definition exists for the document type.
    #[error("no base workflow definition exists for doc type `{doc_type}`")]
    #[diagnostic(
        code(flowsmith::service::missing_base_definition),
        help("Deploy a base definition for this doc type before deriving group workflows.")
    )]
    MissingBaseDefinition { doc_type: String },

    /// A definition already exists for the derived key (create path).
    #[error("a workflow definition already exists for key `{key}`")]
    #[diagnostic(code(flowsmith::service::definition_exists))]
    DefinitionExists { key: String },

    /// No definition exists for the derived key (update path).
    #[error("no workflow definition exists for key `{key}`")]
    #[diagnostic(
        code(flowsmith::service::definition_missing),
        help("Create the group workflow before updating its task chain.")
    )]
    DefinitionMissing { key: String },

    /// The reserved subprocess id was not found in the process graph.
    #[error("subprocess `{id}` not found in process graph")]
    #[diagnostic(code(flowsmith::splice::subgraph_not_found))]
    SubgraphNotFound { id: String },

    /// No boundary event carries an error definition with the reserved code.
    #[error("no boundary error definition with code `{error_code}` found")]
    #[diagnostic(code(flowsmith::splice::error_definition_not_found))]
    ErrorDefinitionNotFound { error_code: String },

    /// The graph does not have exactly one inbound and one outbound flow
    /// touching the subprocess id.
    #[error(
        "could not find source and ref sequence flows: expected exactly one inbound and one \
         outbound boundary flow, found {inbound} inbound and {outbound} outbound"
    )]
    #[diagnostic(
        code(flowsmith::splice::boundary_flow_mismatch),
        help("The graph topology is unsupported for splicing; rebuild it from the assembler skeleton.")
    )]
    BoundaryFlowMismatch { inbound: usize, outbound: usize },

    /// Sequence flows were left without a resolved target after construction.
    #[error("{count} sequence flow(s) left without a target after construction")]
    #[diagnostic(code(flowsmith::chain::open_flows))]
    OpenFlows { count: usize },

    /// Duplicate node id inside a single container.
    #[error("duplicate node id `{id}` in {scope}")]
    #[diagnostic(code(flowsmith::model::duplicate_node_id))]
    DuplicateNodeId { id: String, scope: String },

    /// A task kind string did not name a known kind.
    #[error("unknown task kind `{0}`")]
    #[diagnostic(
        code(flowsmith::tasks::unknown_kind),
        help("Valid kinds are `approval` and `collaboration`.")
    )]
    UnknownTaskKind(String),

    /// An approval task named neither candidate users nor candidate groups.
    #[error("approval task at position {index} has no candidate users or candidate groups")]
    #[diagnostic(
        code(flowsmith::chain::missing_candidates),
        help("Approval tasks must name at least one candidate user or candidate group.")
    )]
    MissingCandidates { index: usize },

    /// Post-deployment lookup unexpectedly returned nothing.
    #[error("definition lookup for key `{key}` returned nothing after deployment")]
    #[diagnostic(code(flowsmith::service::empty_definition))]
    EmptyDefinition { key: String },

    /// Failure reported by the external definition store.
    #[error("definition store error: {message}")]
    #[diagnostic(code(flowsmith::service::store))]
    Store { message: String },
}
