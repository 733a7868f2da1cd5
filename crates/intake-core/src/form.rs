//! # Form Fields and Form State
//!
//! [`FormField`] is the single list of inputs on the contact form, in
//! display order. [`FormState`] holds the raw string value of each one.
//! Region fields (`country`, `state`, `city`) hold region codes, never
//! display names.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::IntakeError;
use crate::region::RegionKind;

/// Every input on the contact form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    PhoneNumber,
    Address,
    Country,
    State,
    City,
    Zipcode,
}

impl FormField {
    /// All fields in display order.
    pub fn all() -> &'static [FormField] {
        &[
            Self::Name,
            Self::Email,
            Self::PhoneNumber,
            Self::Address,
            Self::Country,
            Self::State,
            Self::City,
            Self::Zipcode,
        ]
    }

    /// Field name as bound by the presentation layer and used as the JSON key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::Address => "address",
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::Zipcode => "zipcode",
        }
    }

    /// Placeholder / column header text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::PhoneNumber => "Phone Number",
            Self::Address => "Address",
            Self::Country => "Country",
            Self::State => "State",
            Self::City => "City",
            Self::Zipcode => "Zipcode",
        }
    }

    /// The cascading level this field drives, if it is a region select.
    pub fn region_kind(&self) -> Option<RegionKind> {
        match self {
            Self::Country => Some(RegionKind::Country),
            Self::State => Some(RegionKind::State),
            Self::City => Some(RegionKind::City),
            _ => None,
        }
    }
}

impl From<RegionKind> for FormField {
    fn from(kind: RegionKind) -> Self {
        match kind {
            RegionKind::Country => Self::Country,
            RegionKind::State => Self::State,
            RegionKind::City => Self::City,
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| IntakeError::UnknownField(s.to_string()))
    }
}

/// Raw values of the contact form.
///
/// All values are strings prior to validation; an empty string means
/// the field is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zipcode: String,
}

impl FormState {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::PhoneNumber => &self.phone_number,
            FormField::Address => &self.address,
            FormField::Country => &self.country,
            FormField::State => &self.state,
            FormField::City => &self.city,
            FormField::Zipcode => &self.zipcode,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::PhoneNumber => self.phone_number = value,
            FormField::Address => self.address = value,
            FormField::Country => self.country = value,
            FormField::State => self.state = value,
            FormField::City => self.city = value,
            FormField::Zipcode => self.zipcode = value,
        }
    }

    pub fn clear(&mut self, field: FormField) {
        self.set(field, String::new());
    }

    /// Whether a field is unset (empty or whitespace only).
    pub fn is_blank(&self, field: FormField) -> bool {
        self.get(field).trim().is_empty()
    }

    /// A copy with surrounding whitespace removed from every value.
    pub fn trimmed(&self) -> Self {
        let mut out = Self::default();
        for field in FormField::all() {
            out.set(*field, self.get(*field).trim());
        }
        out
    }

    /// Reset every field to its unset value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
