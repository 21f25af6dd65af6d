use flowsmith::model::{SequenceFlow, SubProcess};

/// Assert a resolved flow from `source` to `target` exists in the subprocess.
#[allow(dead_code)]
pub fn assert_sub_flow(sub: &SubProcess, source: &str, target: &str) {
    let found = sub
        .flows
        .iter()
        .any(|f| f.source == source && f.target.as_deref() == Some(target));
    assert!(
        found,
        "expected flow {source} -> {target}, flows: {:?}",
        sub.flows
            .iter()
            .map(|f| (f.source.as_str(), f.target.as_deref()))
            .collect::<Vec<_>>()
    );
}

/// The outgoing flows of a node inside a subprocess.
#[allow(dead_code)]
pub fn outgoing<'a>(sub: &'a SubProcess, source: &str) -> Vec<&'a SequenceFlow> {
    sub.flows.iter().filter(|f| f.source == source).collect()
}

/// Assert the chain visits the given task ids in order, following only
/// unconditional and approved flows from the subprocess start event.
#[allow(dead_code)]
pub fn assert_chain_order(sub: &SubProcess, expected_task_ids: &[&str]) {
    let mut visited = Vec::new();
    let mut cursor = flowsmith::contract::SUBPROCESS_START_ID.to_string();

    loop {
        let next = sub
            .flows
            .iter()
            .filter(|f| f.source == cursor)
            .find(|f| f.target.as_deref() != Some(flowsmith::contract::SUBPROCESS_ERROR_END_ID))
            .and_then(|f| f.target.clone());
        let Some(next) = next else {
            panic!("chain broke at `{cursor}`; visited so far: {visited:?}");
        };
        if next == flowsmith::contract::SUBPROCESS_END_ID {
            break;
        }
        if sub
            .find_node(&next)
            .and_then(|n| n.as_user_task())
            .is_some()
        {
            visited.push(next.clone());
        }
        cursor = next;
    }

    assert_eq!(visited, expected_task_ids, "task visit order mismatch");
}
