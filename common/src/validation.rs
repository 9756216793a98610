//! Field registration and validation.
//!
//! The form's field set is registered once in [`FORM_FIELDS`]; the PDF
//! renderer and the UIs iterate the same table so labels and ordering
//! never drift apart.

use std::collections::BTreeMap;

use crate::types::ReportFields;

/// Inline message shown for a missing required field.
pub const REQUIRED_MESSAGE: &str = "Este campo es obligatorio";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Flag,
}

/// One registered form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

/// Registered fields, in form and PDF order.
pub const FORM_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "client", label: "Cliente", required: true, kind: FieldKind::Text },
    FieldSpec { name: "reference", label: "Referencia", required: true, kind: FieldKind::Text },
    FieldSpec { name: "dataPlate", label: "Placa de Datos", required: false, kind: FieldKind::Flag },
    FieldSpec { name: "oilLeak", label: "Fuga de Aceite", required: false, kind: FieldKind::Flag },
    FieldSpec { name: "brand", label: "Marca", required: true, kind: FieldKind::Text },
    FieldSpec { name: "model", label: "Tipo", required: true, kind: FieldKind::Text },
    FieldSpec { name: "serial", label: "Serie", required: true, kind: FieldKind::Text },
    FieldSpec { name: "powerKw", label: "Potencia (kW)", required: true, kind: FieldKind::Number },
    FieldSpec { name: "ratio", label: "Ratio", required: false, kind: FieldKind::Text },
    FieldSpec { name: "oilType", label: "Tipo de Aceite", required: false, kind: FieldKind::Text },
    FieldSpec { name: "oilQuantity", label: "Cantidad de Aceite (L)", required: false, kind: FieldKind::Number },
];

/// Registered spec for a field name.
pub fn find_field(name: &str) -> Option<&'static FieldSpec> {
    FORM_FIELDS.iter().find(|spec| spec.name == name)
}

/// Current per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    messages: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn message(&self, name: &str) -> Option<&str> {
        self.messages.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.messages.iter().map(|(name, msg)| (*name, msg.as_str()))
    }
}

/// Display value for a field, by registered name. Flags render as
/// `Sí`/`No`, unset numbers as the empty string.
pub fn field_value(fields: &ReportFields, name: &str) -> String {
    match name {
        "client" => fields.client.clone(),
        "reference" => fields.reference.clone(),
        "dataPlate" => yes_no(fields.data_plate),
        "oilLeak" => yes_no(fields.oil_leak),
        "brand" => fields.brand.clone(),
        "model" => fields.model.clone(),
        "serial" => fields.serial.clone(),
        "powerKw" => fields.power_kw.map(format_number).unwrap_or_default(),
        "ratio" => fields.ratio.clone(),
        "oilType" => fields.oil_type.clone(),
        "oilQuantity" => fields.oil_quantity.map(format_number).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Check every registered field; required fields must be non-blank
/// (text) or set (number).
pub fn validate(fields: &ReportFields) -> ValidationErrors {
    let mut messages = BTreeMap::new();

    for spec in FORM_FIELDS {
        if spec.required && is_missing(fields, spec) {
            messages.insert(spec.name, REQUIRED_MESSAGE.to_string());
        }
    }

    ValidationErrors { messages }
}

fn is_missing(fields: &ReportFields, spec: &FieldSpec) -> bool {
    match spec.kind {
        FieldKind::Flag => false,
        FieldKind::Number => number_value(fields, spec.name).is_none(),
        FieldKind::Text => field_value(fields, spec.name).trim().is_empty(),
    }
}

fn number_value(fields: &ReportFields, name: &str) -> Option<f64> {
    match name {
        "powerKw" => fields.power_kw,
        "oilQuantity" => fields.oil_quantity,
        _ => None,
    }
}

fn yes_no(value: bool) -> String {
    if value { "Sí" } else { "No" }.to_string()
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_fields() -> ReportFields {
        ReportFields {
            client: "Acme".to_string(),
            reference: "R-001".to_string(),
            brand: "Siemens".to_string(),
            model: "Motor".to_string(),
            serial: "SN1".to_string(),
            power_kw: Some(50.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_complete_fields() {
        let errors = validate(&complete_fields());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_validate_empty_fields() {
        let errors = validate(&ReportFields::default());

        // client, reference, brand, model, serial, powerKw
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.message("client"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.message("powerKw"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.message("ratio"), None);
    }

    #[test]
    fn test_validate_blank_text_is_missing() {
        let mut fields = complete_fields();
        fields.client = "   ".to_string();

        let errors = validate(&fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message("client"), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_optional_fields_never_flagged() {
        let mut fields = complete_fields();
        fields.ratio = String::new();
        fields.oil_type = String::new();
        fields.oil_quantity = None;

        assert!(validate(&fields).is_empty());
    }

    #[test]
    fn test_field_value_flags() {
        let mut fields = ReportFields::default();
        assert_eq!(field_value(&fields, "dataPlate"), "No");

        fields.data_plate = true;
        assert_eq!(field_value(&fields, "dataPlate"), "Sí");
    }

    #[test]
    fn test_field_value_numbers() {
        let fields = ReportFields {
            power_kw: Some(50.0),
            oil_quantity: Some(2.5),
            ..Default::default()
        };

        assert_eq!(field_value(&fields, "powerKw"), "50");
        assert_eq!(field_value(&fields, "oilQuantity"), "2.5");
        assert_eq!(field_value(&ReportFields::default(), "powerKw"), "");
    }

    #[test]
    fn test_form_fields_order_and_names() {
        let names: Vec<&str> = FORM_FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names[0], "client");
        assert_eq!(names[1], "reference");
        assert_eq!(names.len(), 11);

        let required: Vec<&str> = FORM_FIELDS
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        assert_eq!(
            required,
            vec!["client", "reference", "brand", "model", "serial", "powerKw"]
        );
    }
}
