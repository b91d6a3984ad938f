//! Data models for extracted shipping data.

pub mod config;
pub mod form;
pub mod record;
