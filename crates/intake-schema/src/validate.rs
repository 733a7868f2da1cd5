//! # Form Validation
//!
//! Compiles a [`FormSchema`] into a `jsonschema` validator and maps each
//! violation to a field and a display message.
//!
//! Values are trimmed before validation, so whitespace-only input counts
//! as empty. At most one message is reported per field; a length
//! violation takes precedence over a format violation on the same field.

use std::collections::BTreeMap;
use std::fmt;

use intake_core::{FormField, FormState, ValidationErrors};
use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::rules::{FieldRule, FormSchema, REQUIRED_MESSAGE};

/// Errors compiling a rule table.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The generated JSON Schema did not compile.
    #[error("failed to compile form schema: {reason}")]
    Build { reason: String },
}

/// A schema violation attributed to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldViolation {
    field: FormField,
    keyword: String,
}

/// Compiled validator for one rule table.
pub struct FormValidator {
    schema: FormSchema,
    validator: Validator,
}

impl fmt::Debug for FormValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl FormValidator {
    /// Compile a rule table.
    pub fn new(schema: FormSchema) -> Result<Self, SchemaError> {
        let document = schema.to_json_schema();
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts.build(&document).map_err(|e| SchemaError::Build {
            reason: e.to_string(),
        })?;
        Ok(Self { schema, validator })
    }

    /// Validator for the contact form.
    pub fn contact() -> Result<Self, SchemaError> {
        Self::new(FormSchema::contact())
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Validate every field. An empty result means the form may be
    /// submitted.
    pub fn validate(&self, form: &FormState) -> ValidationErrors {
        let trimmed = form.trimmed();
        let instance = match serde_json::to_value(&trimmed) {
            Ok(v) => v,
            Err(e) => {
                // FormState is plain strings; this cannot fail in practice.
                tracing::error!(error = %e, "form values did not serialize");
                return FormField::all()
                    .iter()
                    .map(|f| (*f, REQUIRED_MESSAGE.to_string()))
                    .collect();
            }
        };

        let mut by_field: BTreeMap<FormField, Vec<String>> = BTreeMap::new();
        for violation in self.violations(&instance) {
            by_field
                .entry(violation.field)
                .or_default()
                .push(violation.keyword);
        }

        let mut errors = ValidationErrors::new();
        for (field, keywords) in by_field {
            if let Some(message) = self.message_for(field, trimmed.get(field), &keywords) {
                errors.insert(field, message);
            }
        }
        errors
    }

    /// Validate a single field in the context of the whole form.
    pub fn validate_field(&self, form: &FormState, field: FormField) -> Option<String> {
        self.validate(form).remove(field)
    }

    fn violations(&self, instance: &Value) -> Vec<FieldViolation> {
        self.validator
            .iter_errors(instance)
            .filter_map(|e| {
                let instance_path = e.instance_path.to_string();
                let schema_path = e.schema_path.to_string();
                let field = instance_path
                    .trim_start_matches('/')
                    .split('/')
                    .next()
                    .and_then(|name| name.parse::<FormField>().ok());
                let keyword = schema_path.rsplit('/').next().unwrap_or_default().to_string();
                match field {
                    Some(field) => Some(FieldViolation { field, keyword }),
                    None => {
                        tracing::debug!(%instance_path, %schema_path, "violation not attributable to a field");
                        None
                    }
                }
            })
            .collect()
    }

    fn message_for(&self, field: FormField, value: &str, keywords: &[String]) -> Option<String> {
        let fallback = FieldRule::required(field);
        let rule = self.schema.rule(field).unwrap_or(&fallback);
        if !rule.required && value.is_empty() {
            return None;
        }
        let has = |k: &str| keywords.iter().any(|kw| kw == k);

        if value.is_empty() || has("minLength") {
            return Some(rule.length_message(value));
        }
        if has("pattern") {
            if let Some(format) = rule.format {
                return Some(format.message().to_string());
            }
        }
        keywords
            .first()
            .map(|kw| format!("{} is invalid ({kw})", field.label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FieldFormat;
    use proptest::prelude::*;

    fn valid_form() -> FormState {
        FormState {
            name: "Ada".into(),
            email: "ada@x.io".into(),
            phone_number: "5551234567".into(),
            address: "1 Main St".into(),
            country: "US".into(),
            state: "NY".into(),
            city: "New York City".into(),
            zipcode: "10001".into(),
        }
    }

    fn validator() -> FormValidator {
        FormValidator::contact().unwrap()
    }

    #[test]
    fn contact_schema_compiles() {
        let v = validator();
        assert_eq!(v.schema().rules().len(), 8);
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validator().validate(&valid_form()).is_empty());
    }

    #[test]
    fn empty_form_flags_every_field_as_required() {
        let errors = validator().validate(&FormState::default());
        assert_eq!(errors.len(), 8);
        for field in FormField::all() {
            assert_eq!(errors.get(*field), Some(REQUIRED_MESSAGE), "{field}");
        }
    }

    #[test]
    fn whitespace_only_is_empty() {
        let mut form = valid_form();
        form.name = "   ".into();
        assert_eq!(
            validator().validate_field(&form, FormField::Name).as_deref(),
            Some(REQUIRED_MESSAGE)
        );
    }

    #[test]
    fn malformed_email_gets_format_message() {
        let mut form = valid_form();
        form.email = "not-an-email".into();
        let errors = validator().validate(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Email), Some(FieldFormat::Email.message()));
    }

    #[test]
    fn short_zipcode_gets_length_message() {
        let mut form = valid_form();
        form.zipcode = "123".into();
        assert_eq!(
            validator().validate_field(&form, FormField::Zipcode).as_deref(),
            Some("Zipcode must be at least 5 characters")
        );
    }

    #[test]
    fn short_phone_prefers_length_over_format() {
        let mut form = valid_form();
        form.phone_number = "555".into();
        assert_eq!(
            validator().validate_field(&form, FormField::PhoneNumber).as_deref(),
            Some("Phone Number must be at least 10 characters")
        );
    }

    #[test]
    fn phone_with_separators_is_accepted() {
        let mut form = valid_form();
        for phone in ["+1 (555) 123-4567", "555.123.4567", "+44 20 7946 0958"] {
            form.phone_number = phone.into();
            assert!(validator().validate(&form).is_empty(), "{phone}");
        }
    }

    #[test]
    fn phone_with_letters_or_few_digits_is_rejected() {
        let mut form = valid_form();
        for phone in ["555-CALL-NOW", "(555) 12-3456", "12345678901x"] {
            form.phone_number = phone.into();
            assert_eq!(
                validator().validate_field(&form, FormField::PhoneNumber).as_deref(),
                Some(FieldFormat::Phone.message()),
                "{phone}"
            );
        }
    }

    #[test]
    fn optional_blank_field_is_not_reported() {
        let schema = FormSchema::new(
            FormSchema::contact()
                .rules()
                .iter()
                .cloned()
                .chain([FieldRule::optional(FormField::Address)]),
        );
        let v = FormValidator::new(schema).unwrap();
        let mut form = valid_form();
        form.address = String::new();
        assert!(v.validate(&form).is_empty());
    }

    #[test]
    fn validate_field_isolates_one_field() {
        let mut form = FormState::default();
        form.email = "ada@x.io".into();
        let v = validator();
        assert_eq!(v.validate_field(&form, FormField::Email), None);
        assert!(v.validate_field(&form, FormField::Name).is_some());
    }

    proptest! {
        #[test]
        fn blank_required_field_always_flagged(
            field_idx in 0usize..8,
            blank in "[ \t]{0,4}",
        ) {
            let field = FormField::all()[field_idx];
            let mut form = valid_form();
            form.set(field, blank);
            let errors = validator().validate(&form);
            prop_assert_eq!(errors.len(), 1);
            prop_assert_eq!(errors.get(field), Some(REQUIRED_MESSAGE));
        }

        #[test]
        fn well_formed_emails_pass(
            local in "[a-z0-9._]{1,12}",
            domain in "[a-z0-9]{1,10}",
            tld in "[a-z]{2,6}",
        ) {
            let mut form = valid_form();
            form.email = format!("{local}@{domain}.{tld}");
            prop_assert!(validator().validate(&form).is_empty());
        }

        #[test]
        fn zipcode_length_boundary(zip in "[0-9A-Z]{1,9}") {
            let mut form = valid_form();
            form.zipcode = zip.clone();
            let flagged = validator().validate_field(&form, FormField::Zipcode).is_some();
            prop_assert_eq!(flagged, zip.chars().count() < 5);
        }
    }
}
