//! Persistence for variables kept between validation runs.

mod variable_store;

pub use variable_store::{FileVariableStore, InMemoryVariableStore};
