//! Field-level validation rules.
//!
//! Every validator is a pure function from a field value (plus whatever
//! context the rule needs) to `Result<(), FieldError>`. Showing the error
//! next to a control is the presentation layer's job.

use chrono::NaiveDate;
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;
use tracing::error;

use crate::entities::DATE_FORMAT;

pub const NAME_PATTERN: &str = r"^[A-Za-z'-]+$";
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
pub const DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";

/// `regex` has no lookaround, so the strength rule is a conjunction: the
/// allowed alphabet with a minimum length, then one pattern per class.
pub const PASSWORD_PATTERNS: &[&str] = &[
    r"^[A-Za-z0-9!@#$%^&*()_+]{8,}$",
    r"[a-z]",
    r"[A-Z]",
    r"[0-9]",
    r"[!@#$%^&*()_+]",
];

pub const PASSWORD_MESSAGE: &str = "Password must contain a minimum of 8 characters, 1 uppercase, 1 lowercase, 1 numeric, and 1 special character.";
pub const PAST_DATE_MESSAGE: &str = "must be in past date.";
pub const MISMATCH_MESSAGE: &str = "do not match.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("is required.")]
    Required,

    #[error("is not valid.")]
    NotValid,

    #[error("{0}")]
    Custom(String),
}

/// A set of patterns that must all match, with an optional replacement for
/// the generic "is not valid." message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    pub patterns: &'static [&'static str],
    pub message: Option<&'static str>,
}

pub const NAME_RULE: PatternRule = PatternRule {
    patterns: &[NAME_PATTERN],
    message: None,
};

pub const EMAIL_RULE: PatternRule = PatternRule {
    patterns: &[EMAIL_PATTERN],
    message: None,
};

pub const PASSWORD_RULE: PatternRule = PatternRule {
    patterns: PASSWORD_PATTERNS,
    message: Some(PASSWORD_MESSAGE),
};

thread_local! {
    static COMPILED: RefCell<HashMap<String, Regex>> = RefCell::new(HashMap::new());
}

/// Tests `input` against `pattern`. A pattern that fails to compile is
/// logged and counts as a non-match.
pub fn matches_pattern(pattern: &str, input: &str) -> bool {
    COMPILED.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(regex) = cache.get(pattern) {
            return regex.is_match(input);
        }

        match Regex::new(pattern) {
            Ok(regex) => {
                let matched = regex.is_match(input);
                cache.insert(pattern.to_string(), regex);
                matched
            }
            Err(err) => {
                error!(pattern, error = %err, "Invalid regex pattern");
                false
            }
        }
    })
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_presence(value: &str, required: bool) -> Result<(), FieldError> {
    if required && is_blank(value) {
        return Err(FieldError::Required);
    }
    Ok(())
}

pub fn validate_pattern(value: &str, required: bool, rule: &PatternRule) -> Result<(), FieldError> {
    validate_presence(value, required)?;

    if !rule.patterns.iter().all(|pattern| matches_pattern(pattern, value)) {
        return Err(match rule.message {
            Some(message) => FieldError::Custom(message.to_string()),
            None => FieldError::NotValid,
        });
    }
    Ok(())
}

pub fn validate_name(value: &str, required: bool) -> Result<(), FieldError> {
    validate_pattern(value, required, &NAME_RULE)
}

pub fn validate_email(value: &str, required: bool) -> Result<(), FieldError> {
    validate_pattern(value, required, &EMAIL_RULE)
}

pub fn validate_password(value: &str, required: bool) -> Result<(), FieldError> {
    validate_pattern(value, required, &PASSWORD_RULE)
}

/// Parses a `YYYY-MM-DD` birthday.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    if !matches_pattern(DATE_PATTERN, value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn validate_birth_date(value: &str, required: bool, today: NaiveDate) -> Result<(), FieldError> {
    validate_presence(value, required)?;
    if is_blank(value) {
        return Ok(());
    }

    let birth_date = parse_birth_date(value).ok_or(FieldError::NotValid)?;
    if birth_date > today {
        return Err(FieldError::Custom(PAST_DATE_MESSAGE.to_string()));
    }
    Ok(())
}

pub fn validate_confirm_password(
    value: &str,
    required: bool,
    password: &str,
) -> Result<(), FieldError> {
    validate_presence(value, required)?;

    if value != password {
        return Err(FieldError::Custom(MISMATCH_MESSAGE.to_string()));
    }
    Ok(())
}

/// Values a rule may need beyond the field's own value.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub today: NaiveDate,
    pub password: &'a str,
}

/// Which validator guards a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Name,
    Email,
    BirthDate,
    Password,
    ConfirmPassword,
    Presence,
}

impl FieldRule {
    pub fn check(&self, value: &str, required: bool, ctx: &RuleContext<'_>) -> Result<(), FieldError> {
        match self {
            FieldRule::Name => validate_name(value, required),
            FieldRule::Email => validate_email(value, required),
            FieldRule::BirthDate => validate_birth_date(value, required, ctx.today),
            FieldRule::Password => validate_password(value, required),
            FieldRule::ConfirmPassword => validate_confirm_password(value, required, ctx.password),
            FieldRule::Presence => validate_presence(value, required),
        }
    }
}
