//! Machine-readable form descriptions.
//!
//! Every Project Management tab is served as a [`FormSpec`]: the fields a front-end should
//! render, with select options filled from the catalogs and numeric bounds matching what the
//! submission handler enforces.

use crate::errors::Error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Label of the checkbox that acknowledges a cascading delete
pub const ACKNOWLEDGE_CASCADE_LABEL: &str = "I understand and want to proceed with cascading delete";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number { min: f64, max: f64, step: f64, default: f64 },
    /// Exactly one of `options` must be submitted
    Select { options: Vec<String> },
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FormField {
    /// Key of the value in the submitted JSON body
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FormField {
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
        }
    }

    pub fn select(name: &str, label: &str, options: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Select { options },
        }
    }

    pub fn checkbox(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Checkbox,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FormSpec {
    pub id: String,
    pub title: String,
    pub submit_label: String,
    pub fields: Vec<FormField>,
}

impl FormSpec {
    pub fn new(id: &str, title: &str, submit_label: &str, fields: Vec<FormField>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            submit_label: submit_label.to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Inclusive range, step and default of a numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberBounds {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl NumberBounds {
    pub const RATE_VARIANCE: NumberBounds = NumberBounds {
        label: "Rate Variance",
        min: 0.0,
        max: 1.0,
        step: 0.01,
        default: 0.0,
    };

    pub const NUMBER_OF_EPOCHS: NumberBounds = NumberBounds {
        label: "Number of Epochs",
        min: 1.0,
        max: 4.0,
        step: 1.0,
        default: 2.0,
    };

    pub const EPOCH_NUMBER: NumberBounds = NumberBounds {
        label: "Epoch Number",
        min: 1.0,
        max: 4.0,
        step: 1.0,
        default: 1.0,
    };

    pub const EPOCH_PERCENTAGE: NumberBounds = NumberBounds {
        label: "Epoch Percentage",
        min: 0.0,
        max: 100.0,
        step: 1.0,
        default: 100.0,
    };

    pub fn field(&self, name: &str) -> FormField {
        self.field_labelled(name, self.label)
    }

    pub fn field_labelled(&self, name: &str, label: &str) -> FormField {
        FormField {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Number {
                min: self.min,
                max: self.max,
                step: self.step,
                default: self.default,
            },
        }
    }

    pub fn check(&self, value: f64) -> Result<f64, Error> {
        if value.is_finite() && value >= self.min && value <= self.max {
            Ok(value)
        } else {
            Err(Error::bad_request(format!(
                "{} must be between {} and {}, got {}",
                self.label, self.min, self.max, value
            )))
        }
    }

    pub fn check_int(&self, value: i32) -> Result<i32, Error> {
        self.check(f64::from(value)).map(|_| value)
    }
}
