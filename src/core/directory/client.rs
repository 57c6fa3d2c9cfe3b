//! Hospital Directory client contract

use super::error::RemoteError;
use crate::core::csv::HospitalRow;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload for creating one hospital upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHospital {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub creation_batch_id: Uuid,
}

impl NewHospital {
    pub fn from_row(row: &HospitalRow, batch_id: Uuid) -> Self {
        Self {
            name: row.name.clone(),
            address: row.address.clone(),
            phone: row.phone.clone(),
            creation_batch_id: batch_id,
        }
    }
}

/// Response of a successful create call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatedHospital {
    /// Identifier assigned upstream, when the response carried one
    pub id: Option<i64>,
    /// Full response body
    pub body: serde_json::Value,
}

impl CreatedHospital {
    pub fn from_body(body: serde_json::Value) -> Self {
        let id = body.get("id").and_then(serde_json::Value::as_i64);
        Self { id, body }
    }
}

/// Operations the batch processor needs from the Hospital Directory
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Create one hospital tagged with the batch it belongs to
    async fn create_hospital(
        &self,
        hospital: &NewHospital,
    ) -> std::result::Result<CreatedHospital, RemoteError>;

    /// Activate every hospital created under `batch_id`
    async fn activate_batch(
        &self,
        batch_id: Uuid,
    ) -> std::result::Result<Option<serde_json::Value>, RemoteError>;
}

/// Hands out a client for the duration of one processing call
///
/// The returned client owns its connection resources; dropping it releases
/// them, whichever way the call exits.
pub trait ClientFactory: Send + Sync {
    fn acquire(&self) -> Result<Box<dyn DirectoryClient>>;
}

impl<F> ClientFactory for F
where
    F: Fn() -> Result<Box<dyn DirectoryClient>> + Send + Sync,
{
    fn acquire(&self) -> Result<Box<dyn DirectoryClient>> {
        self()
    }
}
