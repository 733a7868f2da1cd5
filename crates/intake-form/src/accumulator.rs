//! # Submission Accumulator
//!
//! `submit` runs the exhaustive validation pass. Any error rejects the
//! submission and leaves the table untouched; otherwise an immutable copy
//! of the (trimmed) values is appended and returned.

use intake_core::{FormState, RegionNames, SubmittedRecord, ValidationErrors};
use intake_schema::FormValidator;

use crate::table::RecordTable;

#[derive(Debug)]
pub struct Accumulator {
    validator: FormValidator,
    table: RecordTable,
}

impl Accumulator {
    pub fn new(validator: FormValidator) -> Self {
        Self {
            validator,
            table: RecordTable::new(),
        }
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    /// Validate and append. Region display names fall back to codes.
    pub fn submit(&mut self, form: &FormState) -> Result<SubmittedRecord, ValidationErrors> {
        self.submit_with_names(form, RegionNames::default())
    }

    /// Validate and append, recording the region display names that were
    /// shown at submission time.
    pub fn submit_with_names(
        &mut self,
        form: &FormState,
        region_names: RegionNames,
    ) -> Result<SubmittedRecord, ValidationErrors> {
        let errors = self.validator.validate(form);
        if !errors.is_empty() {
            tracing::debug!(failing_fields = errors.len(), "submission rejected");
            return Err(errors);
        }

        let record = self
            .table
            .append(SubmittedRecord::new(form.trimmed(), region_names))
            .clone();
        tracing::info!(
            record_id = %record.id(),
            table_len = self.table.len(),
            "record appended"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::FormField;
    use proptest::prelude::*;

    fn accumulator() -> Accumulator {
        Accumulator::new(FormValidator::contact().unwrap())
    }

    fn valid_form() -> FormState {
        FormState {
            name: "Grace Hopper".into(),
            email: "grace@navy.mil".into(),
            phone_number: "+1 202 555 0100".into(),
            address: "1 Navy Yard".into(),
            country: "US".into(),
            state: "NY".into(),
            city: "Buffalo".into(),
            zipcode: "14201".into(),
        }
    }

    #[test]
    fn valid_submit_appends_exactly_one() {
        let mut acc = accumulator();
        let rec = acc.submit(&valid_form()).unwrap();
        assert_eq!(acc.table().len(), 1);
        assert_eq!(acc.table().records()[0], rec);
        assert_eq!(rec.get(FormField::City), "Buffalo");
    }

    #[test]
    fn invalid_submit_leaves_table_unchanged() {
        let mut acc = accumulator();
        acc.submit(&valid_form()).unwrap();
        let mut form = valid_form();
        form.email = "not-an-email".into();
        let errors = acc.submit(&form).unwrap_err();
        assert!(errors.contains(FormField::Email));
        assert_eq!(acc.table().len(), 1);
    }

    #[test]
    fn stored_values_are_trimmed() {
        let mut acc = accumulator();
        let mut form = valid_form();
        form.name = "  Grace Hopper ".into();
        let rec = acc.submit(&form).unwrap();
        assert_eq!(rec.get(FormField::Name), "Grace Hopper");
    }

    #[test]
    fn region_names_are_captured() {
        let mut acc = accumulator();
        let names = RegionNames {
            country: Some("United States".into()),
            state: Some("New York".into()),
            city: Some("Buffalo".into()),
        };
        let rec = acc.submit_with_names(&valid_form(), names).unwrap();
        assert_eq!(rec.display_value(FormField::State), "New York");
    }

    proptest! {
        #[test]
        fn table_grows_only_on_valid_submits(blank_mask in proptest::collection::vec(any::<bool>(), 8)) {
            let mut acc = accumulator();
            let mut form = valid_form();
            for (field, blank) in FormField::all().iter().zip(&blank_mask) {
                if *blank {
                    form.clear(*field);
                }
            }
            let before = acc.table().len();
            let result = acc.submit(&form);
            let any_blank = blank_mask.iter().any(|b| *b);
            prop_assert_eq!(result.is_err(), any_blank);
            prop_assert_eq!(acc.table().len(), before + usize::from(!any_blank));
        }
    }
}
