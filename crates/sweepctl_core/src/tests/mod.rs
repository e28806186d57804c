//! Integration tests for the sweep dispatcher
//!
//! Tests are organized by topic:
//! - `product` - Cardinality and ordering of the job grid
//! - `scenario` - End-to-end job rendering for concrete sweeps
//! - `dispatch` - Submission loop, failure policy and reports
//! - `config` - Partial configuration documents and defaults

mod config;
