//! Utility functions shared by the scoring pipeline and the CLI

pub mod logging;
