pub mod asserts;
pub mod fixtures;
pub mod store;

pub use asserts::*;
pub use fixtures::*;
pub use store::*;
