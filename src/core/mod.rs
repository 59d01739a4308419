//! Core domain models for Shipgate
//!
//! This module defines the fundamental data structures that represent
//! releases, versions, and the gate over them.

pub mod config;
pub mod gate;
pub mod release;
pub mod resolver;
pub mod version;

pub use gate::*;
pub use release::*;
pub use resolver::*;
pub use version::*;
