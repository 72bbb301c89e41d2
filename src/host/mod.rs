//! Host integration: a newline-delimited JSON bridge for tool calls.

pub mod contract;
pub mod stdio;
