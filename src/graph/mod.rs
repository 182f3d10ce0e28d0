//! Graph construction and representation
//!
//! This module builds the sentence similarity graph and its compact CSR form
//! used by rank propagation.

pub mod builder;
pub mod csr;
