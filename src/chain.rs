//! Chain builder: turns an ordered descriptor list into a wired subprocess.
//!
//! Construction walks the descriptor list once, carrying a single *open*
//! sequence flow as a cursor: each new task node closes the previous open
//! flow and emits the next one. The loop replaces the recursive
//! construct-then-recurse formulation so arbitrarily long chains cost no
//! stack, and it makes the cursor invariant (exactly one open flow between
//! steps) directly testable.
//!
//! Output is fully deterministic: same descriptor list, same node ids, same
//! flow count, same targets. Nothing here draws on randomness or hash-map
//! iteration order.
//!
//! # Examples
//!
//! ```
//! use flowsmith::chain::build_task_chain;
//! use flowsmith::contract::ERROR_CODE_REJECTED;
//! use flowsmith::tasks::{TaskDescriptor, TaskKind};
//!
//! let tasks = vec![
//!     TaskDescriptor::new(TaskKind::Approval).with_candidate_user("reviewer"),
//!     TaskDescriptor::new(TaskKind::Collaboration),
//! ];
//!
//! let sub = build_task_chain(&tasks, ERROR_CODE_REJECTED).unwrap();
//! assert!(sub.find_node("approval_1").is_some());
//! assert!(sub.find_node("collab_1").is_some());
//! assert_eq!(sub.open_flow_count(), 0);
//! ```

use tracing::{debug, trace};

use crate::contract::{
    DYNAMIC_SUBPROCESS_ID, DYNAMIC_SUBPROCESS_NAME, SUBPROCESS_END_ID, SUBPROCESS_ERROR_END_ID,
    SUBPROCESS_START_ID,
};
use crate::error::FlowError;
use crate::model::{FlowNode, Listener, SequenceFlow, SubProcess, UserTask};
use crate::tasks::{TaskDescriptor, TaskKind};

const ON_APPROVAL_CREATE: &str = "${taskChainListener.onApprovalCreate(execution, task)}";
const ON_COLLAB_CREATE: &str = "${taskChainListener.onCollabCreate(execution, task)}";
const ON_COLLAB_COMPLETE: &str = "${taskChainListener.onCollabComplete(execution, task)}";
const ON_APPROVED: &str = "${taskChainListener.onApproved(execution)}";
const ON_REJECTED: &str = "${taskChainListener.onRejected(execution)}";

const CONDITION_APPROVED: &str = "${approved == true}";
const CONDITION_REJECTED: &str = "${approved == false}";

/// Per-kind totals computed in a single pre-pass over the full input.
struct KindTotals {
    approvals: usize,
    collaborations: usize,
}

impl KindTotals {
    fn count(tasks: &[TaskDescriptor]) -> Self {
        let approvals = tasks.iter().filter(|t| t.kind == TaskKind::Approval).count();
        Self {
            approvals,
            collaborations: tasks.len() - approvals,
        }
    }
}

/// Build the dynamic task chain as a subprocess with the reserved id.
///
/// The result always contains a start event, an end event, and an error end
/// event bound to `error_code`. An empty `tasks` list yields the minimal
/// valid chain `Start --flow--> End`. Otherwise tasks are wired strictly in
/// input order; each approval task is followed by an exclusive gateway whose
/// rejected branch targets the shared error end event.
///
/// # Errors
///
/// - [`FlowError::MissingCandidates`] if an approval task names neither
///   candidate users nor candidate groups. The build aborts; no partial
///   subprocess is returned.
/// - [`FlowError::OpenFlows`] if the finished chain still contains an
///   unresolved flow. This cannot happen through this construction and is a
///   final integrity check.
pub fn build_task_chain(
    tasks: &[TaskDescriptor],
    error_code: &str,
) -> Result<SubProcess, FlowError> {
    let mut sub = SubProcess::new(DYNAMIC_SUBPROCESS_ID, DYNAMIC_SUBPROCESS_NAME);
    sub.add_node(FlowNode::start(SUBPROCESS_START_ID, "Start Task Chain"));
    sub.add_node(FlowNode::end(SUBPROCESS_END_ID, "End Task Chain"));
    sub.add_node(FlowNode::error_end(
        SUBPROCESS_ERROR_END_ID,
        "Rejected",
        error_code,
    ));

    if tasks.is_empty() {
        sub.add_flow(SequenceFlow::new(SUBPROCESS_START_ID, SUBPROCESS_END_ID));
        return Ok(sub);
    }

    let totals = KindTotals::count(tasks);
    debug!(
        approvals = totals.approvals,
        collaborations = totals.collaborations,
        "building dynamic task chain"
    );

    let mut approval_rank = 0;
    let mut collab_rank = 0;
    let mut open = SequenceFlow::open(SUBPROCESS_START_ID);

    for task in tasks {
        open = match task.kind {
            TaskKind::Approval => {
                approval_rank += 1;
                append_approval(&mut sub, task, approval_rank, totals.approvals, open)?
            }
            TaskKind::Collaboration => {
                collab_rank += 1;
                append_collaboration(&mut sub, task, collab_rank, totals.collaborations, open)
            }
        };
    }

    open.close(SUBPROCESS_END_ID);
    sub.add_flow(open);

    let unresolved = sub.open_flow_count();
    if unresolved > 0 {
        return Err(FlowError::OpenFlows { count: unresolved });
    }
    Ok(sub)
}

/// Append one approval task with its gateway and both outcome flows.
///
/// Closes `prev` onto the new task node and returns the approved flow, left
/// open for the next step in the chain.
fn append_approval(
    sub: &mut SubProcess,
    task: &TaskDescriptor,
    rank: usize,
    total: usize,
    mut prev: SequenceFlow,
) -> Result<SequenceFlow, FlowError> {
    if task.candidate_users.is_empty() && task.candidate_groups.is_empty() {
        return Err(FlowError::MissingCandidates { index: task.index });
    }

    let task_id = format!("{}_{rank}", TaskKind::Approval.prefix());
    let label = match task.display_name() {
        Some(name) => name.to_string(),
        None => format!("Approve Document ({rank}/{total})"),
    };
    trace!(id = %task_id, %label, "appending approval task");

    let node = UserTask::new(
        &task_id,
        label,
        &task.candidate_users,
        &task.candidate_groups,
        vec![Listener::on_create(ON_APPROVAL_CREATE)],
    );

    prev.close(&task_id);
    sub.add_flow(prev);
    sub.add_node(FlowNode::UserTask(node));

    let gateway_id = format!("gateway_approval_{rank}_of_{total}");
    sub.add_node(FlowNode::ExclusiveGateway {
        id: gateway_id.clone(),
        name: Some(format!("Approval Gateway {rank} of {total}")),
    });
    sub.add_flow(SequenceFlow::new(&task_id, &gateway_id));

    let rejected = SequenceFlow::new(&gateway_id, SUBPROCESS_ERROR_END_ID)
        .with_id(format!("rejected_flow_{rank}_of_{total}"))
        .with_name(format!("Rejected {rank} of {total}"))
        .with_condition(CONDITION_REJECTED)
        .with_listener(Listener::on_take(ON_REJECTED));
    sub.add_flow(rejected);

    let approved = SequenceFlow::open(&gateway_id)
        .with_id(format!("approved_flow_{rank}_of_{total}"))
        .with_name(format!("Approved {rank} of {total}"))
        .with_condition(CONDITION_APPROVED)
        .with_listener(Listener::on_take(ON_APPROVED));
    Ok(approved)
}

/// Append one collaboration task; no branching, one open outgoing flow.
fn append_collaboration(
    sub: &mut SubProcess,
    task: &TaskDescriptor,
    rank: usize,
    total: usize,
    mut prev: SequenceFlow,
) -> SequenceFlow {
    let task_id = format!("{}_{rank}", TaskKind::Collaboration.prefix());
    let label = match task.display_name() {
        Some(name) => name.to_string(),
        None => format!("Document Collaboration ({rank}/{total})"),
    };
    trace!(id = %task_id, %label, "appending collaboration task");

    let node = UserTask::new(
        &task_id,
        label,
        &task.candidate_users,
        &task.candidate_groups,
        vec![
            Listener::on_create(ON_COLLAB_CREATE),
            Listener::on_complete(ON_COLLAB_COMPLETE),
        ],
    );

    prev.close(&task_id);
    sub.add_flow(prev);
    sub.add_node(FlowNode::UserTask(node));

    SequenceFlow::open(&task_id)
        .with_id(format!("collab_flow_{rank}_of_{total}"))
        .with_name(format!("Collaboration Flow {rank} of {total}"))
}
