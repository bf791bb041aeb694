use serde::{Deserialize, Serialize};

use super::time::{BirthDate, Timestamp};

/// A student record as seen by the service and the API.
///
/// Text fields use the empty string for "unset"; dates and timestamps use
/// their zero value. Serialized field names match the storage columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fname: String,
    #[serde(default)]
    pub lname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gender: String,
    #[serde(rename = "dateofbirth", default)]
    pub date_of_birth: BirthDate,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "createdby", default)]
    pub created_by: String,
    #[serde(rename = "createdon", default)]
    pub created_on: Timestamp,
    #[serde(rename = "updatedby", default)]
    pub updated_by: String,
    #[serde(rename = "updatedon", default)]
    pub updated_on: Timestamp,
}
