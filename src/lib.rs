//! # Flowsmith: Dynamic Task Chains for Process Graphs
//!
//! Flowsmith builds and modifies the *dynamic task chain* embedded inside a
//! larger BPMN-like process graph. Given an ordered list of task descriptors
//! it produces a fully wired subprocess implementing the sequence, and it can
//! splice a freshly built subprocess into an existing graph in place of a
//! previous one without disturbing anything else in that graph.
//!
//! Everything here is a pure, synchronous, deterministic transformation over
//! in-memory graph values. Deployment, definition lookup, and visual layout
//! are delegated to external collaborators behind traits in [`service`].
//!
//! ## Core Concepts
//!
//! - **Task descriptors**: ordered, caller-supplied specifications of human
//!   tasks ([`tasks::TaskDescriptor`]); approval tasks branch through an
//!   exclusive gateway, collaboration tasks pass straight through
//! - **Open edges**: flows created with only a source, resolved when the next
//!   node in the chain is known ([`model::SequenceFlow`])
//! - **The reserved subprocess**: the chain always lives under one constant
//!   id ([`contract::DYNAMIC_SUBPROCESS_ID`]), which is what makes splicing
//!   possible
//! - **Skeleton assembly**: a fixed start/submit/subprocess/end frame with a
//!   rejection retry loop ([`assembler::ProcessAssembler`])
//!
//! ## Quick Start
//!
//! ```
//! use flowsmith::assembler::ProcessAssembler;
//! use flowsmith::contract::DYNAMIC_SUBPROCESS_ID;
//! use flowsmith::tasks::{TaskDescriptor, TaskKind};
//!
//! let tasks = vec![
//!     TaskDescriptor::new(TaskKind::Collaboration).with_name("Draft review"),
//!     TaskDescriptor::new(TaskKind::Approval).with_candidate_group("legal"),
//! ];
//!
//! let graph = ProcessAssembler::default()
//!     .assemble("contract", "emea", &tasks)
//!     .unwrap();
//!
//! assert_eq!(graph.id, "contract_emea");
//! let chain = graph.subprocess(DYNAMIC_SUBPROCESS_ID).unwrap();
//! assert_eq!(chain.user_tasks().count(), 2);
//! ```
//!
//! ## Rebuild, Never Mutate
//!
//! A chain is rebuilt in full on every structural change; the old subprocess
//! is discarded wholesale and the replacement spliced in by reserved id:
//!
//! ```
//! use flowsmith::chain::build_task_chain;
//! use flowsmith::contract::{DYNAMIC_SUBPROCESS_ID, ERROR_CODE_REJECTED};
//! use flowsmith::assembler::ProcessAssembler;
//! use flowsmith::splice::splice_subgraph;
//! use flowsmith::tasks::{TaskDescriptor, TaskKind};
//!
//! let graph = ProcessAssembler::default()
//!     .assemble_empty("contract", "emea", "Contract workflow")
//!     .unwrap();
//!
//! let tasks = vec![TaskDescriptor::new(TaskKind::Approval).with_candidate_user("alice")];
//! let chain = build_task_chain(&tasks, ERROR_CODE_REJECTED).unwrap();
//! let updated = splice_subgraph(&graph, DYNAMIC_SUBPROCESS_ID, chain).unwrap();
//!
//! assert!(updated.validate().is_ok());
//! ```
//!
//! ## Module Guide
//!
//! - [`model`] - Nodes, flows, subprocess and process-graph containers
//! - [`tasks`] - Task descriptors and the id-prefix classifier
//! - [`chain`] - The chain builder (ordered descriptors → wired subprocess)
//! - [`splice`] - Subgraph surgery on existing graphs
//! - [`assembler`] - Skeleton assembly and configuration
//! - [`service`] - Orchestration over external store/layout collaborators
//! - [`contract`] - Reserved identifiers shared with external systems
//! - [`error`] - The fatal, non-retryable error taxonomy

pub mod assembler;
pub mod chain;
pub mod contract;
pub mod error;
pub mod model;
pub mod service;
pub mod splice;
pub mod tasks;
