//! Integration tests for subgraph splicing.

mod common;
use common::*;

use flowsmith::chain::build_task_chain;
use flowsmith::contract::{DYNAMIC_SUBPROCESS_ID, ERROR_CODE_REJECTED};
use flowsmith::error::FlowError;
use flowsmith::model::SequenceFlow;
use flowsmith::splice::splice_subgraph;
use flowsmith::tasks::descriptors_from;

#[test]
fn splice_preserves_untouched_flows_bit_for_bit() {
    let graph = populated_workflow("report", "sales", &[collab(), approval("u1")]);

    let replacement =
        build_task_chain(&[approval("u2"), collab()], ERROR_CODE_REJECTED).unwrap();
    let updated = splice_subgraph(&graph, DYNAMIC_SUBPROCESS_ID, replacement).unwrap();

    let untouched = |flows: &[SequenceFlow]| -> Vec<serde_json::Value> {
        flows
            .iter()
            .filter(|f| !f.touches(DYNAMIC_SUBPROCESS_ID))
            .map(|f| serde_json::to_value(f).unwrap())
            .collect()
    };
    assert_eq!(untouched(&graph.flows), untouched(&updated.flows));

    // The two boundary flows survive with their endpoints intact.
    let inbound = updated
        .flows
        .iter()
        .filter(|f| f.target.as_deref() == Some(DYNAMIC_SUBPROCESS_ID))
        .count();
    let outbound = updated
        .flows
        .iter()
        .filter(|f| f.source == DYNAMIC_SUBPROCESS_ID)
        .count();
    assert_eq!((inbound, outbound), (1, 1));
}

#[test]
fn splice_swaps_chain_content_wholesale() {
    let graph = populated_workflow("report", "sales", &[approval("u1")]);

    let replacement =
        build_task_chain(&[collab(), group_approval("g1")], ERROR_CODE_REJECTED).unwrap();
    let updated = splice_subgraph(&graph, DYNAMIC_SUBPROCESS_ID, replacement).unwrap();

    let sub = updated.subprocess(DYNAMIC_SUBPROCESS_ID).unwrap();
    assert_chain_order(sub, &["collab_1", "approval_1"]);
    let recovered = descriptors_from(sub);
    assert_eq!(recovered.len(), 2);
    assert_eq!(recovered[1].candidate_groups, vec!["g1"]);
}

#[test]
fn splice_result_still_validates() {
    let graph = empty_workflow("report", "sales");
    let replacement = build_task_chain(&[approval("u1")], ERROR_CODE_REJECTED).unwrap();

    let updated = splice_subgraph(&graph, DYNAMIC_SUBPROCESS_ID, replacement).unwrap();
    assert!(updated.validate().is_ok());
}

#[test]
fn missing_outbound_boundary_flow_fails() {
    let mut graph = empty_workflow("report", "sales");
    graph.flows.retain(|f| f.source != DYNAMIC_SUBPROCESS_ID);

    let replacement = build_task_chain(&[], ERROR_CODE_REJECTED).unwrap();
    let err = splice_subgraph(&graph, DYNAMIC_SUBPROCESS_ID, replacement).unwrap_err();
    assert!(matches!(
        err,
        FlowError::BoundaryFlowMismatch {
            inbound: 1,
            outbound: 0
        }
    ));
}

#[test]
fn boundary_event_with_foreign_error_code_fails() {
    let mut graph = empty_workflow("report", "sales");
    for node in &mut graph.nodes {
        if let flowsmith::model::FlowNode::BoundaryEvent(event) = node {
            event.error_code = "some_other_code".into();
        }
    }

    let replacement = build_task_chain(&[], ERROR_CODE_REJECTED).unwrap();
    let err = splice_subgraph(&graph, DYNAMIC_SUBPROCESS_ID, replacement).unwrap_err();
    assert!(matches!(err, FlowError::ErrorDefinitionNotFound { .. }));
}
