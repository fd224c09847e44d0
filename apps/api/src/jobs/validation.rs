use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::job::{JobForm, JobInput, DATE_FORMAT};

pub const COMPANY_MIN_LEN: usize = 2;
pub const COMPANY_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validates and normalises a submitted form.
///
/// Every failing field is reported, not just the first. Text is trimmed and
/// blank optional fields become `None`.
pub fn validate_job_form(form: &JobForm) -> Result<JobInput, Vec<FieldError>> {
    let mut errors = Vec::new();

    let company = form.company.as_deref().unwrap_or_default().trim();
    let company_len = company.chars().count();
    if company.is_empty() {
        errors.push(FieldError::new("company", "The Company field is required."));
    } else if !(COMPANY_MIN_LEN..=COMPANY_MAX_LEN).contains(&company_len) {
        errors.push(FieldError::new(
            "company",
            format!(
                "The field Company must be a string with a minimum length of {COMPANY_MIN_LEN} and a maximum length of {COMPANY_MAX_LEN}."
            ),
        ));
    }

    let link = trimmed(form.link.as_deref());
    if let Some(link) = &link {
        if !is_web_url(link) {
            errors.push(FieldError::new(
                "link",
                "The Link field is not a valid fully-qualified http or https URL.",
            ));
        }
    }

    let application_date = match trimmed(form.application_date.as_deref()) {
        None => {
            errors.push(FieldError::new(
                "application_date",
                "The Application Date field is required.",
            ));
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new(
                    "application_date",
                    format!("The value '{raw}' is not valid for Application Date."),
                ));
                None
            }
        },
    };

    match application_date {
        Some(application_date) if errors.is_empty() => Ok(JobInput {
            company: company.to_string(),
            description: trimmed(form.description.as_deref()),
            link,
            application_date,
            status: trimmed(form.status.as_deref()),
        }),
        _ => Err(errors),
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn is_web_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}
