use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;

/// One row of the `student` table. Every column except `id` may be NULL.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StudentRow {
    pub id: String,
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    #[sqlx(rename = "dateofbirth")]
    pub date_of_birth: Option<NaiveDateTime>,
    pub address: Option<String>,
    #[sqlx(rename = "createdby")]
    pub created_by: Option<String>,
    #[sqlx(rename = "createdon")]
    pub created_on: Option<DateTime<Utc>>,
    #[sqlx(rename = "updatedby")]
    pub updated_by: Option<String>,
    #[sqlx(rename = "updatedon")]
    pub updated_on: Option<DateTime<Utc>>,
}

impl StudentRow {
    /// Column list in the order every query selects them
    pub const COLUMNS: &'static str =
        "id, fname, lname, email, gender, dateofbirth, address, createdby, createdon, updatedby, updatedon";
}
