//! Hospital Directory API client
//!
//! The batch processor only depends on the [`DirectoryClient`] contract and a
//! [`ClientFactory`]; [`HttpDirectoryClient`] is the production implementation.

mod client;
mod error;
mod http;

pub use client::{ClientFactory, CreatedHospital, DirectoryClient, NewHospital};
pub use error::{DEFAULT_REMOTE_DETAIL, RemoteError};
pub use http::{HttpClientFactory, HttpDirectoryClient};
