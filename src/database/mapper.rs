//! Conversion between [`Student`] and the nullable [`StudentRow`].
//!
//! Writing marks every text column present, even when empty, and writes the
//! date of birth as NULL only when it is the zero date. Reading maps NULL
//! text to `""`, a NULL date to the zero date and a NULL timestamp to the
//! zero timestamp.
//!
//! Reading is lossy: NULL and empty/zero are indistinguishable afterwards, so
//! `from_row(to_row(s))` only returns `s` when its text fields are non-empty
//! and its dates are set. Callers treat zero values as "unknown".

use crate::database::models::StudentRow;
use crate::types::{BirthDate, Student, Timestamp};

/// Which write is being prepared; decides how the audit timestamps are stamped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePath {
    /// `createdon` is stamped, `updatedon` stays NULL
    Create,
    /// `updatedon` is stamped, `createdon` is carried through untouched
    Update,
}

pub fn to_row(student: &Student, path: WritePath, now: Timestamp) -> StudentRow {
    let (created_on, updated_on) = match path {
        WritePath::Create => (Some(now.as_utc()), None),
        WritePath::Update => (timestamp_column(student.created_on), Some(now.as_utc())),
    };

    StudentRow {
        id: student.id.clone(),
        fname: Some(student.fname.clone()),
        lname: Some(student.lname.clone()),
        email: Some(student.email.clone()),
        gender: Some(student.gender.clone()),
        date_of_birth: (!student.date_of_birth.is_zero()).then(|| student.date_of_birth.as_naive()),
        address: Some(student.address.clone()),
        created_by: Some(student.created_by.clone()),
        created_on,
        updated_by: Some(student.updated_by.clone()),
        updated_on,
    }
}

pub fn from_row(row: StudentRow) -> Student {
    Student {
        id: row.id,
        fname: row.fname.unwrap_or_default(),
        lname: row.lname.unwrap_or_default(),
        email: row.email.unwrap_or_default(),
        gender: row.gender.unwrap_or_default(),
        date_of_birth: row.date_of_birth.map(BirthDate::from_naive).unwrap_or_default(),
        address: row.address.unwrap_or_default(),
        created_by: row.created_by.unwrap_or_default(),
        created_on: row.created_on.map(Timestamp::from_utc).unwrap_or_default(),
        updated_by: row.updated_by.unwrap_or_default(),
        updated_on: row.updated_on.map(Timestamp::from_utc).unwrap_or_default(),
    }
}

fn timestamp_column(value: Timestamp) -> Option<chrono::DateTime<chrono::Utc>> {
    (!value.is_zero()).then(|| value.as_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ada() -> Student {
        Student {
            id: "6f1c1b9e-0000-4000-8000-000000000001".to_string(),
            fname: "Ada".to_string(),
            lname: "Lovelace".to_string(),
            email: "ada@x.io".to_string(),
            gender: "F".to_string(),
            date_of_birth: BirthDate::parse("1815-12-10").unwrap(),
            address: "12 St James's Square".to_string(),
            created_by: "user-1".to_string(),
            created_on: Timestamp::zero(),
            updated_by: "user-2".to_string(),
            updated_on: Timestamp::zero(),
        }
    }

    #[test]
    fn create_stamps_created_on_only() {
        let now = Timestamp::now();
        let row = to_row(&ada(), WritePath::Create, now);

        assert_eq!(row.created_on, Some(now.as_utc()));
        assert_eq!(row.updated_on, None);
    }

    #[test]
    fn update_stamps_updated_on_and_keeps_created_on() {
        let created = Timestamp::now();
        let now = Timestamp::from_utc(created.as_utc() + Duration::seconds(30));
        let student = Student { created_on: created, ..ada() };

        let row = to_row(&student, WritePath::Update, now);
        assert_eq!(row.created_on, Some(created.as_utc()));
        assert_eq!(row.updated_on, Some(now.as_utc()));
    }

    #[test]
    fn empty_strings_are_written_as_present() {
        let student = Student {
            id: "x".to_string(),
            ..Default::default()
        };
        let row = to_row(&student, WritePath::Create, Timestamp::now());

        assert_eq!(row.fname.as_deref(), Some(""));
        assert_eq!(row.address.as_deref(), Some(""));
        assert_eq!(row.updated_by.as_deref(), Some(""));
    }

    #[test]
    fn zero_birth_date_is_written_as_null() {
        let student = Student {
            date_of_birth: BirthDate::zero(),
            ..ada()
        };
        let row = to_row(&student, WritePath::Create, Timestamp::now());
        assert_eq!(row.date_of_birth, None);

        let row = to_row(&ada(), WritePath::Create, Timestamp::now());
        assert!(row.date_of_birth.is_some());
    }

    #[test]
    fn nulls_read_back_as_zero_values() {
        let row = StudentRow {
            id: "x".to_string(),
            fname: None,
            lname: None,
            email: None,
            gender: None,
            date_of_birth: None,
            address: None,
            created_by: None,
            created_on: None,
            updated_by: None,
            updated_on: None,
        };

        let student = from_row(row);
        assert_eq!(student.id, "x");
        assert_eq!(student.fname, "");
        assert!(student.date_of_birth.is_zero());
        assert!(student.created_on.is_zero());
        assert!(student.updated_on.is_zero());
    }

    #[test]
    fn round_trips_fully_populated_students() {
        let now = Timestamp::now();
        let original = Student {
            created_on: now,
            updated_on: now,
            ..ada()
        };

        // The update path carries createdon through and restamps updatedon with `now`
        let back = from_row(to_row(&original, WritePath::Update, now));
        assert_eq!(back, original);
    }

    #[test]
    fn empty_and_null_collapse_on_read() {
        let mut row = to_row(&ada(), WritePath::Create, Timestamp::now());
        row.address = None;
        let from_null = from_row(row.clone());

        row.address = Some(String::new());
        let from_empty = from_row(row);

        assert_eq!(from_null, from_empty);
    }
}
