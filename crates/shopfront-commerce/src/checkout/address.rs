//! Address types.

use crate::checkout::PostalCode;
use serde::{Deserialize, Serialize};

/// Address fields returned by a postal-code lookup.
///
/// Any field may be empty; the service omits what it doesn't know.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressFields {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter state code (e.g. "SP").
    pub state_code: String,
}

/// A delivery address as entered at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// CEP, once 8 digits have been entered.
    pub postal_code: Option<PostalCode>,
    /// Street name.
    pub street: String,
    /// House or building number.
    pub number: String,
    /// Apartment, suite, etc.
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state_code: String,
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the looked-up fields, keeping number and complement.
    pub fn fill_from(&mut self, fields: &AddressFields) {
        self.street = fields.street.clone();
        self.neighborhood = fields.neighborhood.clone();
        self.city = fields.city.clone();
        self.state_code = fields.state_code.clone();
    }

    /// Set number.
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    /// Set complement.
    pub fn with_complement(mut self, complement: impl Into<String>) -> Self {
        self.complement = Some(complement.into());
        self
    }

    /// Check whether any field besides the postal code has been filled.
    pub fn has_details(&self) -> bool {
        !(self.street.is_empty()
            && self.number.is_empty()
            && self.neighborhood.is_empty()
            && self.city.is_empty()
            && self.state_code.is_empty())
    }

    /// Format as a single line, skipping empty parts.
    pub fn one_line(&self) -> String {
        let street = match (self.street.is_empty(), self.number.is_empty()) {
            (false, false) => format!("{}, {}", self.street, self.number),
            (false, true) => self.street.clone(),
            (true, false) => self.number.clone(),
            (true, true) => String::new(),
        };
        let city = match (self.city.is_empty(), self.state_code.is_empty()) {
            (false, false) => format!("{}/{}", self.city, self.state_code),
            (false, true) => self.city.clone(),
            (true, false) => self.state_code.clone(),
            (true, true) => String::new(),
        };

        let mut parts = vec![street];
        if let Some(complement) = &self.complement {
            parts.push(complement.clone());
        }
        parts.push(self.neighborhood.clone());
        parts.push(city);
        if let Some(code) = &self.postal_code {
            parts.push(code.formatted());
        }

        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" - ")
    }
}
