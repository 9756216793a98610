//! Interactive field entry for `inspect-report new --interactive`.

use dialoguer::{Confirm, Input};

use inspect_report_common::{FieldKind, ReportFields, FORM_FIELDS};

use crate::error::{InspectError, Result};

/// Prompt for every registered field, in form order. Required fields
/// may not be left empty; optional ones may.
pub fn fill_fields() -> Result<ReportFields> {
    let mut fields = ReportFields::default();

    for spec in FORM_FIELDS {
        match spec.kind {
            FieldKind::Flag => {
                let value = Confirm::new()
                    .with_prompt(spec.label)
                    .default(false)
                    .interact()
                    .map_err(prompt_error)?;
                set_flag(&mut fields, spec.name, value);
            }
            FieldKind::Number => {
                let raw: String = Input::new()
                    .with_prompt(spec.label)
                    .allow_empty(!spec.required)
                    .validate_with(|input: &String| -> std::result::Result<(), &str> {
                        if input.trim().is_empty() && !spec.required {
                            return Ok(());
                        }
                        input
                            .trim()
                            .parse::<f64>()
                            .map(|_| ())
                            .map_err(|_| "introduce un número")
                    })
                    .interact_text()
                    .map_err(prompt_error)?;
                set_number(&mut fields, spec.name, raw.trim().parse().ok());
            }
            FieldKind::Text => {
                let value: String = Input::new()
                    .with_prompt(spec.label)
                    .allow_empty(!spec.required)
                    .interact_text()
                    .map_err(prompt_error)?;
                set_text(&mut fields, spec.name, value.trim().to_string());
            }
        }
    }

    Ok(fields)
}

fn set_text(fields: &mut ReportFields, name: &str, value: String) {
    match name {
        "client" => fields.client = value,
        "reference" => fields.reference = value,
        "brand" => fields.brand = value,
        "model" => fields.model = value,
        "serial" => fields.serial = value,
        "ratio" => fields.ratio = value,
        "oilType" => fields.oil_type = value,
        _ => {}
    }
}

fn set_flag(fields: &mut ReportFields, name: &str, value: bool) {
    match name {
        "dataPlate" => fields.data_plate = value,
        "oilLeak" => fields.oil_leak = value,
        _ => {}
    }
}

fn set_number(fields: &mut ReportFields, name: &str, value: Option<f64>) {
    match name {
        "powerKw" => fields.power_kw = value,
        "oilQuantity" => fields.oil_quantity = value,
        _ => {}
    }
}

fn prompt_error(error: dialoguer::Error) -> InspectError {
    InspectError::Prompt(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_cover_every_registered_field() {
        let mut fields = ReportFields::default();

        for spec in FORM_FIELDS {
            match spec.kind {
                FieldKind::Text => set_text(&mut fields, spec.name, "x".to_string()),
                FieldKind::Flag => set_flag(&mut fields, spec.name, true),
                FieldKind::Number => set_number(&mut fields, spec.name, Some(1.0)),
            }
        }

        // every registered field must now read back non-empty
        for spec in FORM_FIELDS {
            let value = inspect_report_common::field_value(&fields, spec.name);
            assert!(!value.is_empty(), "campo sin setter: {}", spec.name);
        }
    }
}
