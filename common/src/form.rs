//! Complaint form state
//!
//! The state is replaced wholesale on every edit: [`FormState::apply`] takes
//! the old value and returns the new one. Fill date and time are seeded once
//! and have no update variant.

use crate::error::{Error, Result};
use crate::phone::{digits_only, format_phone, CountryCode};
use chrono::{Local, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Answer of the "Poškození" select
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Damage {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "ano")]
    Yes,
    #[serde(rename = "ne")]
    No,
}

impl Damage {
    /// Value as written into the document
    pub fn as_str(&self) -> &'static str {
        match self {
            Damage::Unspecified => "",
            Damage::Yes => "ano",
            Damage::No => "ne",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Damage::Unspecified => "-- Vyberte --",
            Damage::Yes => "Ano",
            Damage::No => "Ne",
        }
    }
}

impl std::str::FromStr for Damage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(Damage::Unspecified),
            "ano" | "yes" | "y" => Ok(Damage::Yes),
            "ne" | "no" | "n" => Ok(Damage::No),
            _ => Err(format!("Unknown damage value: {}. Use ano or ne", s)),
        }
    }
}

/// Photo picked in the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAttachment {
    pub file_name: String,
    /// Source path, used to reload the bytes of a saved form
    #[serde(default)]
    pub path: String,
    pub mime_type: String,
    #[serde(skip)]
    pub data: Vec<u8>,
}

/// One edit of one form field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    Address(String),
    Email(String),
    CountryCode(CountryCode),
    /// Raw phone text; stored re-grouped under the current dialing code
    Phone(String),
    Message(String),
    Damage(Damage),
    AgeMonths(Option<u32>),
    Photos(Vec<PhotoAttachment>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    first_name: String,
    last_name: String,
    address: String,
    email: String,
    country_code: CountryCode,
    phone: String,
    message: String,
    damage: Damage,
    age_months: Option<u32>,
    photos: Vec<PhotoAttachment>,
    #[serde(rename = "date")]
    filled_date: String,
    #[serde(rename = "time")]
    filled_time: String,
}

impl FormState {
    /// Fresh form stamped with `now`
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            filled_date: now.format("%Y-%m-%d").to_string(),
            filled_time: now.format("%H:%M").to_string(),
            ..Default::default()
        }
    }

    /// Fresh form stamped with the local clock
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// Loads a saved form.
    ///
    /// The phone is re-grouped under the stored dialing code and a missing
    /// fill date/time is stamped with the local clock.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: FormState = serde_json::from_str(json)?;
        Ok(state.normalized(Local::now().naive_local()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn normalized(mut self, now: NaiveDateTime) -> Self {
        self.phone = format_phone(self.country_code.code(), &self.phone);
        if self.filled_date.is_empty() || self.filled_time.is_empty() {
            let stamp = FormState::new(now);
            self.filled_date = stamp.filled_date;
            self.filled_time = stamp.filled_time;
        }
        self
    }

    /// Returns the state with one field replaced
    pub fn apply(self, update: FieldUpdate) -> Self {
        match update {
            FieldUpdate::FirstName(first_name) => Self { first_name, ..self },
            FieldUpdate::LastName(last_name) => Self { last_name, ..self },
            FieldUpdate::Address(address) => Self { address, ..self },
            FieldUpdate::Email(email) => Self { email, ..self },
            FieldUpdate::CountryCode(country_code) => Self {
                phone: country_code.format(&self.phone),
                country_code,
                ..self
            },
            FieldUpdate::Phone(raw) => Self {
                phone: self.country_code.format(&raw),
                ..self
            },
            FieldUpdate::Message(message) => Self { message, ..self },
            FieldUpdate::Damage(damage) => Self { damage, ..self },
            FieldUpdate::AgeMonths(age_months) => Self { age_months, ..self },
            FieldUpdate::Photos(photos) => Self { photos, ..self },
        }
    }

    pub fn apply_all<I>(self, updates: I) -> Self
    where
        I: IntoIterator<Item = FieldUpdate>,
    {
        updates.into_iter().fold(self, FormState::apply)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn country_code(&self) -> CountryCode {
        self.country_code
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Dialing code and phone, trimmed when the phone is empty
    pub fn full_phone(&self) -> String {
        format!("{} {}", self.country_code.code(), self.phone)
            .trim()
            .to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn damage(&self) -> Damage {
        self.damage
    }

    pub fn age_months(&self) -> Option<u32> {
        self.age_months
    }

    pub fn photos(&self) -> &[PhotoAttachment] {
        &self.photos
    }

    pub fn filled_date(&self) -> &str {
        &self.filled_date
    }

    pub fn filled_time(&self) -> &str {
        &self.filled_time
    }

    /// Checks the constraints the form inputs declare
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        let required = [
            (RequiredField::FirstName, &self.first_name),
            (RequiredField::LastName, &self.last_name),
            (RequiredField::Address, &self.address),
            (RequiredField::Email, &self.email),
            (RequiredField::Message, &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                issues.push(ValidationIssue::Missing(field));
            }
        }
        if self.damage == Damage::Unspecified {
            issues.push(ValidationIssue::Missing(RequiredField::Damage));
        }
        if self.age_months.is_none() {
            issues.push(ValidationIssue::Missing(RequiredField::AgeMonths));
        }

        if !self.email.trim().is_empty() && !is_valid_email(self.email.trim()) {
            issues.push(ValidationIssue::InvalidEmail(self.email.clone()));
        }
        if !self.phone.is_empty() && !is_valid_phone(&self.phone) {
            issues.push(ValidationIssue::InvalidPhone(self.phone.clone()));
        }

        issues
    }

    /// Fails with every issue [`FormState::validate`] finds
    pub fn ensure_valid(&self) -> Result<()> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Error::Invalid(issues))
        }
    }
}

/// Required inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    FirstName,
    LastName,
    Address,
    Email,
    Message,
    Damage,
    AgeMonths,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::FirstName => "Jméno",
            RequiredField::LastName => "Příjmení",
            RequiredField::Address => "Adresa",
            RequiredField::Email => "E-mail",
            RequiredField::Message => "Popis závady",
            RequiredField::Damage => "Poškození",
            RequiredField::AgeMonths => "Stáří (v měsících)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    Missing(RequiredField),
    InvalidEmail(String),
    InvalidPhone(String),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Missing(field) => write!(f, "Povinné pole není vyplněno: {}", field.label()),
            ValidationIssue::InvalidEmail(email) => write!(f, "Neplatný e-mail: {}", email),
            ValidationIssue::InvalidPhone(phone) => write!(f, "Neplatné tel. číslo: {}", phone),
        }
    }
}

lazy_static! {
    // Same shape browsers accept for <input type="email">
    static ref EMAIL_RE: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^[0-9 ]+$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub const PHONE_MIN_DIGITS: usize = 5;
pub const PHONE_MAX_DIGITS: usize = 20;

/// Digits and spaces only, 5 to 20 digits
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
        && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits_only(phone).len())
}
