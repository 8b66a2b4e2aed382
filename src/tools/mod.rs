//! Tools - one module per utility
//!
//! Each tool is a pure transform plus a `run_*` entry point that maps its result into
//! the unified result model.

pub mod case;
pub mod convert;
pub mod encode;
pub mod hash;
pub mod markdown;
pub mod uuidgen;
