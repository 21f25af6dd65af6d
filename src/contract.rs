//! Reserved identifiers that form the process-graph contract.
//!
//! Every graph produced by this crate uses these identifiers, and the
//! [splicer](crate::splice) and the [task classifier](crate::tasks) rely on
//! them to locate the dynamic chain inside an arbitrary process graph. They
//! are part of the public contract: external serializers, deployment
//! collaborators, and task listeners address elements by these ids.
//!
//! Display-facing strings (namespace, process-key separator) are deliberately
//! *not* here; they travel in [`AssemblerConfig`](crate::assembler::AssemblerConfig).

/// Id of the subprocess holding the dynamic task chain.
///
/// Constant across rebuilds: a freshly built chain always carries this id,
/// which is what lets the splicer swap it into an existing graph without
/// rewiring any boundary flow.
pub const DYNAMIC_SUBPROCESS_ID: &str = "dynamic_task_subprocess";

/// Display name of the dynamic subprocess.
pub const DYNAMIC_SUBPROCESS_NAME: &str = "Dynamic Task Chain";

/// Start event id inside the dynamic subprocess.
pub const SUBPROCESS_START_ID: &str = "dynamic_subprocess_start_event";

/// End event id inside the dynamic subprocess.
pub const SUBPROCESS_END_ID: &str = "dynamic_subprocess_end_event";

/// Error end event id inside the dynamic subprocess; rejection flows land here.
pub const SUBPROCESS_ERROR_END_ID: &str = "rejected_error_end_event";

/// Id of the boundary event attached to the dynamic subprocess.
pub const REJECTED_BOUNDARY_EVENT_ID: &str = "rejected_boundary_event";

/// Error code linking the subprocess error end event to the boundary event.
pub const ERROR_CODE_REJECTED: &str = "task_chain_rejected";

/// Id of the skeleton's process-level start event.
pub const PROCESS_START_ID: &str = "start";

/// Id of the skeleton's process-level end event.
pub const PROCESS_END_ID: &str = "end";

/// Id of the skeleton's submit task. The boundary event's "Rejected" flow
/// loops back here so a rejected document can be resubmitted.
pub const SUBMIT_TASK_ID: &str = "submit_task";

/// Id prefix for approval task nodes (`approval_1`, `approval_2`, ...).
pub const APPROVAL_TASK_PREFIX: &str = "approval";

/// Id prefix for collaboration task nodes (`collab_1`, `collab_2`, ...).
pub const COLLAB_TASK_PREFIX: &str = "collab";
