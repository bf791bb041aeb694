// handlers/students/request.rs - Request body shared by POST and PUT

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::types::{BirthDate, Student};

const MAX_NAME_LEN: usize = 255;
const MAX_ADDRESS_LEN: usize = 1024;
const MIN_BIRTH_YEAR: i32 = 1800;
const GENDERS: &[&str] = &["m", "f", "o", "male", "female", "other"];

/// Client-editable student fields.
///
/// Server-owned fields (`id`, `createdby`, `createdon`, `updatedon`) are not
/// part of the shape and are ignored if sent.
#[derive(Debug, Default, Deserialize)]
pub struct StudentRequest {
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
    #[serde(rename = "updatedby", default)]
    pub updated_by: String,
}

impl StudentRequest {
    /// Check every field and report all problems at once
    pub fn validate(&self, today: NaiveDate) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        for (field, value) in [("fname", &self.fname), ("lname", &self.lname), ("email", &self.email)] {
            if value.trim().is_empty() {
                field_errors.insert(field.to_string(), "This field is required".to_string());
            } else if value.chars().count() > MAX_NAME_LEN {
                field_errors.insert(field.to_string(), format!("Must be at most {} characters", MAX_NAME_LEN));
            }
        }

        if !field_errors.contains_key("email") && !is_valid_email(&self.email) {
            field_errors.insert("email".to_string(), "Invalid email address".to_string());
        }

        if !self.gender.is_empty() && !GENDERS.contains(&self.gender.to_ascii_lowercase().as_str()) {
            field_errors.insert("gender".to_string(), "Must be one of M, F, O".to_string());
        }

        if self.address.chars().count() > MAX_ADDRESS_LEN {
            field_errors.insert(
                "address".to_string(),
                format!("Must be at most {} characters", MAX_ADDRESS_LEN),
            );
        }

        if !self.date_of_birth.is_zero() {
            let date = self.date_of_birth.date();
            if date.year() < MIN_BIRTH_YEAR || date > today {
                field_errors.insert(
                    "dateofbirth".to_string(),
                    format!("Must be between {}-01-01 and today", MIN_BIRTH_YEAR),
                );
            }
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid student", Some(field_errors)))
        }
    }

    pub fn into_student(self) -> Student {
        Student {
            fname: self.fname.trim().to_string(),
            lname: self.lname.trim().to_string(),
            email: self.email.trim().to_string(),
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            address: self.address,
            updated_by: self.updated_by,
            ..Default::default()
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty() && domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
