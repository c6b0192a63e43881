//! Create/edit form: raw field text, coercion, validation and mode.

use crate::error::ValidationError;
use crate::models::{Property, PropertyId, PropertyInput};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Longest description the server accepts
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Raw text of the four form inputs, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub address: String,
    pub price: String,
    pub size: String,
    pub description: String,
}

/// One of the editable inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Address,
    Price,
    Size,
    Description,
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "address" => Ok(Field::Address),
            "price" => Ok(Field::Price),
            "size" => Ok(Field::Size),
            "description" | "desc" => Ok(Field::Description),
            other => Err(format!("unknown form field '{}'", other)),
        }
    }
}

/// Form contents after trimming and numeric coercion. `None` marks a
/// number field whose text is not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub address: String,
    pub price: Option<f64>,
    pub size: Option<f64>,
    pub description: String,
}

impl Candidate {
    /// Apply the form rules in order; the first failure is the only one reported.
    pub fn validate(self) -> Result<PropertyInput, ValidationError> {
        if self.address.is_empty() || self.description.is_empty() {
            return Err(ValidationError::MissingText);
        }
        let (Some(price), Some(size)) = (self.price, self.size) else {
            return Err(ValidationError::NotNumeric);
        };
        if price <= 0.0 {
            return Err(ValidationError::NonPositivePrice);
        }
        if size <= 0.0 {
            return Err(ValidationError::NonPositiveSize);
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN,
            });
        }
        Ok(PropertyInput {
            address: self.address,
            price,
            size,
            description: self.description,
        })
    }
}

/// Blank text counts as zero; anything unparseable is not a number.
///
/// Unsigned `0x`/`0o`/`0b` integer literals are read in their radix.
/// Infinite and NaN values are rejected since they cannot be sent as JSON.
fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    let radix = match trimmed.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    let value = match radix {
        Some(radix) => {
            let digits = &trimmed[2..];
            if digits.starts_with('+') {
                return None;
            }
            u64::from_str_radix(digits, radix).ok()? as f64
        }
        None => trimmed.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Form state: field text plus the edit cursor
#[derive(Debug, Clone, Default)]
pub struct FormController {
    fields: FormFields,
    editing: Option<PropertyId>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Id of the record being edited, `None` in create mode
    pub fn editing(&self) -> Option<&PropertyId> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Address => self.fields.address = value,
            Field::Price => self.fields.price = value,
            Field::Size => self.fields.size = value,
            Field::Description => self.fields.description = value,
        }
    }

    pub fn read(&self) -> Candidate {
        Candidate {
            address: self.fields.address.trim().to_string(),
            price: coerce_number(&self.fields.price),
            size: coerce_number(&self.fields.size),
            description: self.fields.description.trim().to_string(),
        }
    }

    /// Switch to edit mode and load the record into the fields
    pub fn start_edit(&mut self, property: &Property) {
        self.editing = Some(property.id.clone());
        self.fields = FormFields {
            address: property.address.clone(),
            price: property.price.to_string(),
            size: property.size.to_string(),
            description: property.description.clone(),
        };
    }

    /// Back to create mode with empty fields
    pub fn reset(&mut self) {
        self.editing = None;
        self.fields = FormFields::default();
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Property"
        } else {
            "Add New Property"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Save Changes"
        } else {
            "Add Property"
        }
    }

    /// The cancel trigger only shows while editing
    pub fn cancel_visible(&self) -> bool {
        self.is_editing()
    }
}
