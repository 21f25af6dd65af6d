//! Logical node/edge model for BPMN-like process graphs.
//!
//! The model is deliberately value-oriented: nodes, flows, and containers are
//! plain owned data with no interior mutability and no aliasing between
//! elements. Everything derives `Clone` as a deep copy and serde traits for
//! the external serializer.
//!
//! # Core Types
//!
//! - [`FlowNode`]: tagged union over every node kind (events, user tasks,
//!   gateways, subprocesses, boundary events)
//! - [`SequenceFlow`]: a directed edge, possibly *open* (target unresolved)
//!   during construction
//! - [`SubProcess`]: the container holding the dynamic task chain
//! - [`ProcessGraph`]: the top-level graph handed to deployment
//!
//! # Examples
//!
//! ```
//! use flowsmith::model::{FlowNode, SequenceFlow, SubProcess};
//!
//! let mut sub = SubProcess::new("demo_sub", "Demo");
//! sub.add_node(FlowNode::start("s", "Start"));
//! sub.add_node(FlowNode::end("e", "End"));
//! sub.add_flow(SequenceFlow::new("s", "e"));
//!
//! assert!(sub.validate().is_ok());
//! ```

mod element;
mod flow;
mod process;


pub use element::{BoundaryEvent, FlowNode, Listener, UserTask};
pub use flow::SequenceFlow;
pub use process::{ProcessGraph, SubProcess};
