//! Test helpers module
//!
//! This module provides utilities for testing the StyleBuddy dialogue
//! manager: in-memory store fakes, a mock chat-completions server and
//! assembled service fixtures.

pub mod context;
pub mod llm_mock;
pub mod stores;

pub use context::*;
pub use llm_mock::*;
pub use stores::*;
