//! Data models: the Form 16 field set, extraction results and configuration.

pub mod config;
pub mod form16;
