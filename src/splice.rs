//! Subgraph splicer: swap a freshly built chain into an existing graph.
//!
//! Splicing never mutates the input graph. It deep-copies the graph, verifies
//! the structure it depends on (reserved subprocess, boundary error
//! definition, exactly two boundary flows), and replaces the subprocess node
//! in place. Because a rebuilt chain always carries the same reserved id as
//! the one it replaces, no flow rewiring is needed; the boundary flows keep
//! pointing at the id they already reference.

use tracing::debug;

use crate::contract::ERROR_CODE_REJECTED;
use crate::error::FlowError;
use crate::model::{FlowNode, ProcessGraph, SubProcess};

/// Replace the subprocess identified by `old_id` with `new_sub`.
///
/// `new_sub` must carry the same reserved id as the subprocess it replaces;
/// the chain builder's output always does.
///
/// # Errors
///
/// - [`FlowError::SubgraphNotFound`] if no subprocess with `old_id` exists.
/// - [`FlowError::ErrorDefinitionNotFound`] if no boundary event attached to
///   the subprocess carries the reserved error code.
/// - [`FlowError::BoundaryFlowMismatch`] unless exactly one top-level flow
///   targets the subprocess and exactly one leaves it.
///
/// On success, every flow not touching `old_id` is carried over untouched.
///
/// # Examples
///
/// ```
/// use flowsmith::assembler::ProcessAssembler;
/// use flowsmith::chain::build_task_chain;
/// use flowsmith::contract::{DYNAMIC_SUBPROCESS_ID, ERROR_CODE_REJECTED};
/// use flowsmith::splice::splice_subgraph;
/// use flowsmith::tasks::{TaskDescriptor, TaskKind};
///
/// let assembler = ProcessAssembler::default();
/// let graph = assembler.assemble_empty("invoice", "finance", "Invoice workflow").unwrap();
///
/// let tasks = vec![TaskDescriptor::new(TaskKind::Approval).with_candidate_group("finance")];
/// let chain = build_task_chain(&tasks, ERROR_CODE_REJECTED).unwrap();
///
/// let updated = splice_subgraph(&graph, DYNAMIC_SUBPROCESS_ID, chain).unwrap();
/// let sub = updated.subprocess(DYNAMIC_SUBPROCESS_ID).unwrap();
/// assert!(sub.find_node("approval_1").is_some());
/// ```
pub fn splice_subgraph(
    graph: &ProcessGraph,
    old_id: &str,
    new_sub: SubProcess,
) -> Result<ProcessGraph, FlowError> {
    debug_assert_eq!(new_sub.id, old_id, "replacement subprocess must keep the reserved id");

    let mut updated = graph.clone();

    let position = updated
        .nodes
        .iter()
        .position(|node| matches!(node, FlowNode::SubProcess(sub) if sub.id == old_id))
        .ok_or_else(|| FlowError::SubgraphNotFound {
            id: old_id.to_string(),
        })?;

    let boundary = updated
        .boundary_event_for(old_id)
        .filter(|event| event.error_code == ERROR_CODE_REJECTED)
        .ok_or_else(|| FlowError::ErrorDefinitionNotFound {
            error_code: ERROR_CODE_REJECTED.to_string(),
        })?;
    debug!(boundary = %boundary.id, subprocess = old_id, "splicing dynamic subprocess");

    let inbound = updated
        .flows
        .iter()
        .filter(|f| f.target.as_deref() == Some(old_id))
        .count();
    let outbound = updated.flows.iter().filter(|f| f.source == old_id).count();
    if inbound != 1 || outbound != 1 {
        return Err(FlowError::BoundaryFlowMismatch { inbound, outbound });
    }

    updated.nodes[position] = FlowNode::SubProcess(new_sub);
    Ok(updated)
}
