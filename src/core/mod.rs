//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Input reading (inline, file, stdin)
//! - Tool error taxonomy
//! - Tracing setup
//! - Common utilities

pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod render;
pub mod util;
