//! Internal test modules - whitebox tests with crate access
//!
//! End-to-end gesture scenarios driven through [`crate::handler::ScrollHandler`]
//! and [`crate::jump::JumpDirectionController`] against one shared store, the
//! way a host page wires them.
