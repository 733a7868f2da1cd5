//! # Declarative Field Rules
//!
//! One [`FieldRule`] per form field. The rule table is the single source
//! for both the compiled JSON Schema and the messages shown to the user.
//!
//! | Field | Required | Min length | Format |
//! |-------|----------|------------|--------|
//! | name | yes | | |
//! | email | yes | | email |
//! | phoneNumber | yes | 10 | phone (≥ 10 digits) |
//! | address | yes | | |
//! | country | yes | | |
//! | state | yes | | |
//! | city | yes | | |
//! | zipcode | yes | 5 | |

use intake_core::FormField;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Message for a required field left empty.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// `$id` of the compiled contact form schema.
pub const FORM_SCHEMA_ID: &str = "https://schemas.contact-intake.dev/form.schema.json";

/// Value formats checked by pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFormat {
    /// `local@domain.tld` with no whitespace and a single `@`.
    Email,
    /// At least ten digits, an optional leading `+`, and the separators
    /// space, parentheses, hyphen, and dot.
    Phone,
}

impl FieldFormat {
    /// ECMA-262 pattern enforced by the JSON Schema `pattern` keyword.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Email => r"^[^@\s]+@[^@\s]+\.[^@\s]+$",
            Self::Phone => r"^\+?(?:[\s().-]*[0-9]){10,}[\s().-]*$",
        }
    }

    /// Message shown when a non-empty value does not match.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Email => "Enter a valid email address",
            Self::Phone => "Enter a phone number with at least 10 digits",
        }
    }
}

/// Validation rule for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    pub field: FormField,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,
}

impl FieldRule {
    /// A required field with no further constraints.
    pub fn required(field: FormField) -> Self {
        Self {
            field,
            required: true,
            min_length: None,
            format: None,
        }
    }

    pub fn optional(field: FormField) -> Self {
        Self {
            required: false,
            ..Self::required(field)
        }
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Effective `minLength`: required fields need at least one character.
    pub fn effective_min_length(&self) -> Option<usize> {
        match (self.required, self.min_length) {
            (true, None) => Some(1),
            (true, Some(n)) => Some(n.max(1)),
            (false, n) => n,
        }
    }

    /// Message for a too-short value.
    pub fn length_message(&self, value: &str) -> String {
        match self.min_length {
            Some(n) if !(self.required && value.is_empty()) => {
                format!("{} must be at least {n} characters", self.field.label())
            }
            _ => REQUIRED_MESSAGE.to_string(),
        }
    }

    fn to_property(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!("string"));
        prop.insert("title".into(), json!(self.field.label()));
        if let Some(n) = self.effective_min_length() {
            prop.insert("minLength".into(), json!(n));
        }
        if let Some(format) = self.format {
            prop.insert("pattern".into(), json!(format.pattern()));
        }
        Value::Object(prop)
    }
}

/// Rule table for a whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    rules: Vec<FieldRule>,
}

impl FormSchema {
    /// Build a schema from rules. Later rules for the same field replace
    /// earlier ones.
    pub fn new(rules: impl IntoIterator<Item = FieldRule>) -> Self {
        let mut out: Vec<FieldRule> = Vec::new();
        for rule in rules {
            match out.iter_mut().find(|r| r.field == rule.field) {
                Some(existing) => *existing = rule,
                None => out.push(rule),
            }
        }
        out.sort_by_key(|r| r.field);
        Self { rules: out }
    }

    /// The contact form rule table.
    pub fn contact() -> Self {
        Self::new([
            FieldRule::required(FormField::Name),
            FieldRule::required(FormField::Email).format(FieldFormat::Email),
            FieldRule::required(FormField::PhoneNumber)
                .min_length(10)
                .format(FieldFormat::Phone),
            FieldRule::required(FormField::Address),
            FieldRule::required(FormField::Country),
            FieldRule::required(FormField::State),
            FieldRule::required(FormField::City),
            FieldRule::required(FormField::Zipcode).min_length(5),
        ])
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, field: FormField) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// Render the rule table as a JSON Schema (Draft 2020-12) document.
    ///
    /// Every form field is a required string property; emptiness is
    /// expressed through `minLength`, so violations always point at a
    /// field rather than at the root object.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in FormField::all() {
            let prop = match self.rule(*field) {
                Some(rule) => rule.to_property(),
                None => json!({"type": "string", "title": field.label()}),
            };
            properties.insert(field.as_str().to_string(), prop);
        }
        let required: Vec<&str> = FormField::all().iter().map(|f| f.as_str()).collect();

        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "$id": FORM_SCHEMA_ID,
            "title": "Contact form",
            "type": "object",
            "required": required,
            "properties": properties,
        })
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::contact()
    }
}
