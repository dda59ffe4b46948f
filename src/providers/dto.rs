use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_DESCRIPTION, DEFAULT_PROFILE_IMAGE};
use crate::error::ApiError;
use crate::providers::repo::{NewUser, ProviderDetailRow, ProviderSummaryRow};

/// Text fields collected from the multipart registration form, keyed by the
/// form's camelCase names.
#[derive(Debug, Default)]
pub struct RegisterForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub postcode: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub occupation: Option<String>,
}

impl RegisterForm {
    pub fn set(&mut self, name: &str, value: String) {
        match name {
            "firstName" => self.first_name = Some(value),
            "lastName" => self.last_name = Some(value),
            "age" => self.age = Some(value),
            "address" => self.address = Some(value),
            "city" => self.city = Some(value),
            "country" => self.country = Some(value),
            "postcode" => self.postcode = Some(value),
            "mobile" => self.mobile = Some(value),
            "email" => self.email = Some(value),
            "occupation" => self.occupation = Some(value),
            // unknown fields are ignored
            _ => {}
        }
    }

    /// All fields must be present and non-empty; `age` must parse.
    /// `profile_image` starts at the placeholder and is replaced by the
    /// caller once an upload is stored.
    pub fn validate(self) -> Result<NewUser, ApiError> {
        let required = |v: Option<String>| -> Result<String, ApiError> {
            match v {
                Some(s) if !s.trim().is_empty() => Ok(s),
                _ => Err(ApiError::bad_request("All fields are required.")),
            }
        };
        let age = required(self.age)?
            .trim()
            .parse::<i32>()
            .map_err(|_| ApiError::bad_request("age must be an integer"))?;
        Ok(NewUser {
            first_name: required(self.first_name)?,
            last_name: required(self.last_name)?,
            age,
            address: required(self.address)?,
            city: required(self.city)?,
            country: required(self.country)?,
            postcode: required(self.postcode)?,
            mobile: required(self.mobile)?,
            email: required(self.email)?,
            occupation: required(self.occupation)?,
            profile_image: DEFAULT_PROFILE_IMAGE.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub occupation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProviderSummary {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub image: String,
}

impl From<ProviderSummaryRow> for ProviderSummary {
    fn from(r: ProviderSummaryRow) -> Self {
        Self {
            id: r.id,
            name: format!("{} {}", r.first_name, r.last_name),
            category: r.occupation,
            image: or_placeholder(r.profile_image),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProviderDetail {
    pub name: String,
    pub occupation: String,
    pub contact: String,
    pub image: String,
    pub description: String,
}

impl From<ProviderDetailRow> for ProviderDetail {
    fn from(r: ProviderDetailRow) -> Self {
        Self {
            name: format!("{} {}", r.first_name, r.last_name),
            occupation: r.occupation,
            contact: r.mobile,
            image: or_placeholder(r.profile_image),
            description: r
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        }
    }
}

fn or_placeholder(image: String) -> String {
    if image.is_empty() {
        DEFAULT_PROFILE_IMAGE.to_string()
    } else {
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn full_form() -> RegisterForm {
        let mut form = RegisterForm::default();
        for (k, v) in [
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
            ("age", "36"),
            ("address", "12 St James Sq"),
            ("city", "London"),
            ("country", "UK"),
            ("postcode", "SW1Y 4JH"),
            ("mobile", "+44123456"),
            ("email", "ada@example.com"),
            ("occupation", "mathematician"),
        ] {
            form.set(k, v.to_string());
        }
        form
    }

    #[test]
    fn validate_accepts_complete_form() {
        let user = full_form().validate().expect("valid form");
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.age, 36);
        assert_eq!(user.profile_image, DEFAULT_PROFILE_IMAGE);
    }

    #[test]
    fn validate_rejects_missing_field() {
        let mut form = full_form();
        form.email = None;
        let err = form.validate().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "All fields are required.");
    }

    #[test]
    fn validate_rejects_blank_field() {
        let mut form = full_form();
        form.city = Some("   ".into());
        let err = form.validate().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validate_rejects_non_numeric_age() {
        let mut form = full_form();
        form.age = Some("old".into());
        let err = form.validate().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "age must be an integer");
    }

    #[test]
    fn summary_concatenates_name_and_defaults_image() {
        let summary = ProviderSummary::from(ProviderSummaryRow {
            id: 7,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            occupation: "mathematician".into(),
            profile_image: String::new(),
        });
        assert_eq!(summary.name, "Ada Lovelace");
        assert_eq!(summary.category, "mathematician");
        assert_eq!(summary.image, DEFAULT_PROFILE_IMAGE);
    }

    #[test]
    fn detail_defaults_null_description() {
        let detail = ProviderDetail::from(ProviderDetailRow {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            occupation: "mathematician".into(),
            profile_image: "img/123.jpg".into(),
            mobile: "+44123456".into(),
            description: None,
        });
        assert_eq!(detail.description, DEFAULT_DESCRIPTION);
        assert_eq!(detail.image, "img/123.jpg");
        assert_eq!(detail.contact, "+44123456");
    }

    #[test]
    fn detail_keeps_stored_description() {
        let detail = ProviderDetail::from(ProviderDetailRow {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            occupation: "mathematician".into(),
            profile_image: "img/123.jpg".into(),
            mobile: "+44123456".into(),
            description: Some("First programmer".into()),
        });
        assert_eq!(detail.description, "First programmer");
    }
}
