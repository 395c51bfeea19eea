//! Total Nutrition Therapy (TNT) Library
//!
//! Clinical nutrition target calculations and the MCP tools that serve them.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
