use flowsmith::assembler::ProcessAssembler;
use flowsmith::model::ProcessGraph;
use flowsmith::tasks::{TaskDescriptor, TaskKind};

#[allow(dead_code)]
pub fn approval(user: &str) -> TaskDescriptor {
    TaskDescriptor::new(TaskKind::Approval).with_candidate_user(user)
}

#[allow(dead_code)]
pub fn group_approval(group: &str) -> TaskDescriptor {
    TaskDescriptor::new(TaskKind::Approval).with_candidate_group(group)
}

#[allow(dead_code)]
pub fn collab() -> TaskDescriptor {
    TaskDescriptor::new(TaskKind::Collaboration)
}

/// An assembled graph with an empty dynamic chain, default configuration.
#[allow(dead_code)]
pub fn empty_workflow(doc_type: &str, group: &str) -> ProcessGraph {
    ProcessAssembler::default()
        .assemble_empty(doc_type, group, "Test workflow")
        .expect("empty assembly never fails")
}

/// An assembled graph whose chain contains the given tasks.
#[allow(dead_code)]
pub fn populated_workflow(doc_type: &str, group: &str, tasks: &[TaskDescriptor]) -> ProcessGraph {
    ProcessAssembler::default()
        .assemble(doc_type, group, tasks)
        .expect("fixture tasks are valid")
}
