//! Client-side form validation. Each form validates all fields at once and,
//! when valid, produces the request body the matching hook sends.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::models::dates::DATE_FORMAT;
use crate::models::user::NewExperience;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{}", join_errors(.0))]
    Invalid(Vec<FieldError>),
}

impl FormError {
    pub fn fields(&self) -> &[FieldError] {
        match self {
            FormError::Invalid(errors) => errors,
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

/// Accumulates field errors in declaration order.
#[derive(Default)]
struct Checks(Vec<FieldError>);

impl Checks {
    fn fail(&mut self, field: &'static str, message: &str) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    fn required(&mut self, field: &'static str, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.fail(field, message);
            return false;
        }
        true
    }

    fn email(&mut self, value: &str) {
        if self.required("email", value, "Email is required")
            && !email_pattern().is_match(value.trim())
        {
            self.fail("email", "Invalid email");
        }
    }

    fn date(&mut self, field: &'static str, value: &str) -> Option<NaiveDate> {
        match NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                self.fail(field, "Use the YYYY-MM-DD format");
                None
            }
        }
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FormError> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(FormError::Invalid(self.0))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        let mut checks = Checks::default();
        checks.email(&self.email);
        checks.required("password", &self.password, "Password is required");
        checks.finish(|| LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FormError> {
        let mut checks = Checks::default();
        checks.required("name", &self.name, "Name is required");
        checks.email(&self.email);
        if checks.required("password", &self.password, "Password is required")
            && self.password.chars().count() < MIN_PASSWORD_LEN
        {
            checks.fail("password", "Password must be at least 6 characters");
        }
        checks.finish(|| RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExperienceForm {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

impl ExperienceForm {
    pub fn validate(&self) -> Result<NewExperience, FormError> {
        let mut checks = Checks::default();
        checks.required("title", &self.title, "Title is required");
        checks.required("description", &self.description, "Description is required");

        let start = if checks.required("startDate", &self.start_date, "Start date is required") {
            checks.date("startDate", &self.start_date)
        } else {
            None
        };

        let end = match self.end_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => checks.date("endDate", raw),
            _ => None,
        };

        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                checks.fail("endDate", "End date cannot be before the start date");
            }
        }

        match start {
            Some(start_date) => checks.finish(|| NewExperience {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                start_date,
                end_date: end,
            }),
            None => Err(FormError::Invalid(checks.0)),
        }
    }
}
