//! HTTP route modules

pub mod bulk;
