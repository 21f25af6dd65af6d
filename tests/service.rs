//! Integration tests for workflow orchestration over an in-memory store.

mod common;
use common::*;

use flowsmith::assembler::AssemblerConfig;
use flowsmith::error::FlowError;
use flowsmith::service::{DefinitionHandle, WorkflowService};
use flowsmith::tasks::TaskKind;

fn service(store: MemoryStore) -> WorkflowService<MemoryStore> {
    WorkflowService::new(store, AssemblerConfig::default())
}

#[test]
fn create_requires_base_definition() {
    let service = service(MemoryStore::default());
    let err = service.create_group_workflow("contract", "emea").unwrap_err();
    assert!(matches!(err, FlowError::MissingBaseDefinition { .. }));
}

#[test]
fn create_rejects_existing_definition() {
    let store = MemoryStore::with_base("contract");
    store.seed_definition(empty_workflow("contract", "emea"));

    let err = service(store)
        .create_group_workflow("contract", "emea")
        .unwrap_err();
    assert!(matches!(err, FlowError::DefinitionExists { .. }));
}

#[test]
fn create_deploys_rekeyed_clone_of_base() {
    let store = MemoryStore::with_base("contract");
    let service = service(store);

    let handle = service.create_group_workflow("contract", "emea").unwrap();
    assert_eq!(handle.as_str(), "contract_emea");

    let tasks = service.dynamic_tasks(&handle).unwrap();
    assert!(tasks.is_empty(), "fresh definitions carry an empty chain");
}

#[test]
fn create_reports_vanished_deployment() {
    let store = MemoryStore::with_base("contract");
    store.drop_deployments.set(true);

    let err = service(store)
        .create_group_workflow("contract", "emea")
        .unwrap_err();
    assert!(matches!(err, FlowError::EmptyDefinition { .. }));
}

#[test]
fn update_requires_existing_definition() {
    let service = service(MemoryStore::with_base("contract"));
    let err = service
        .update_dynamic_tasks("contract", "emea", &[collab()])
        .unwrap_err();
    assert!(matches!(err, FlowError::DefinitionMissing { .. }));
}

#[test]
fn update_replaces_chain_and_reads_back() {
    let store = MemoryStore::with_base("contract");
    let service = service(store);
    service.create_group_workflow("contract", "emea").unwrap();

    let tasks = vec![approval("alice"), collab(), group_approval("legal")];
    let handle = service
        .update_dynamic_tasks("contract", "emea", &tasks)
        .unwrap();

    let recovered = service.dynamic_tasks(&handle).unwrap();
    let kinds: Vec<TaskKind> = recovered.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TaskKind::Approval,
            TaskKind::Collaboration,
            TaskKind::Approval
        ]
    );
    // Indexes are 1-based and ordered.
    let indexes: Vec<usize> = recovered.iter().map(|t| t.index).collect();
    assert_eq!(indexes, vec![1, 2, 3]);
}

#[test]
fn update_propagates_chain_validation_errors() {
    let store = MemoryStore::with_base("contract");
    let service = service(store);
    let handle = service.create_group_workflow("contract", "emea").unwrap();

    let invalid = vec![flowsmith::tasks::TaskDescriptor::new(TaskKind::Approval)];
    let err = service
        .update_dynamic_tasks("contract", "emea", &invalid)
        .unwrap_err();
    assert!(matches!(err, FlowError::MissingCandidates { .. }));

    // The stored definition is untouched by the failed update.
    assert!(service.dynamic_tasks(&handle).unwrap().is_empty());
}

#[test]
fn dynamic_tasks_requires_the_reserved_subprocess() {
    let store = MemoryStore::with_base("contract");
    let mut stripped = empty_workflow("contract", "emea");
    stripped
        .nodes
        .retain(|n| n.as_subprocess().is_none());
    store.seed_definition(stripped);

    let service = service(store);
    let err = service
        .dynamic_tasks(&DefinitionHandle::new("contract_emea"))
        .unwrap_err();
    assert!(matches!(err, FlowError::SubgraphNotFound { .. }));
}
