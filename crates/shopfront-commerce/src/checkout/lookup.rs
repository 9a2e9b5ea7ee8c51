//! Postal-code lookup results and request sequencing.

use crate::checkout::{AddressFields, PostalCode};
use serde::{Deserialize, Serialize};

/// Result of looking up a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupOutcome {
    /// Address fields were returned.
    Found(AddressFields),
    /// The service answered that the code doesn't exist.
    NotFound,
    /// The request failed (transport, HTTP status or bad payload).
    Failed(String),
}

/// An in-flight lookup. Only the most recently issued ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    seq: u64,
    postal_code: PostalCode,
}

impl LookupTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The code to look up.
    pub fn postal_code(&self) -> &PostalCode {
        &self.postal_code
    }
}

/// Issues tickets and tells whether a response is still current.
#[derive(Debug, Clone, Default)]
pub struct LookupSequencer {
    last_issued: u64,
    pending: Option<u64>,
}

impl LookupSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a lookup, superseding any in flight.
    pub fn issue(&mut self, postal_code: PostalCode) -> LookupTicket {
        self.last_issued += 1;
        self.pending = Some(self.last_issued);
        LookupTicket {
            seq: self.last_issued,
            postal_code,
        }
    }

    /// Drop whatever is in flight; its response will be ignored.
    pub fn invalidate(&mut self) {
        self.pending = None;
    }

    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        self.pending == Some(ticket.seq)
    }

    /// Consume the ticket if it is current.
    pub fn settle(&mut self, ticket: &LookupTicket) -> bool {
        if self.is_current(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Lookup state shown next to the postal-code field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    #[default]
    Idle,
    Searching,
    Filled,
    NotFound,
    Failed,
}

impl LookupStatus {
    /// Help text for the status; empty when idle.
    pub fn message(&self) -> &'static str {
        match self {
            LookupStatus::Idle => "",
            LookupStatus::Searching => "Searching address...",
            LookupStatus::Filled => "Address filled automatically.",
            LookupStatus::NotFound => "Postal code not found. Fill in the address manually.",
            LookupStatus::Failed => "Could not look up the postal code. Fill in the address manually.",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LookupStatus::NotFound | LookupStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> PostalCode {
        PostalCode::from_input(s).unwrap()
    }

    #[test]
    fn test_latest_ticket_wins() {
        let mut seq = LookupSequencer::new();
        let first = seq.issue(code("01001000"));
        let second = seq.issue(code("20040002"));

        assert!(!seq.is_current(&first));
        assert!(!seq.settle(&first));
        assert!(seq.settle(&second));
        assert!(!seq.is_pending());
        assert!(!seq.settle(&second));
    }

    #[test]
    fn test_invalidate() {
        let mut seq = LookupSequencer::new();
        let ticket = seq.issue(code("01001000"));
        seq.invalidate();
        assert!(!seq.settle(&ticket));
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(LookupStatus::Idle.message(), "");
        assert!(LookupStatus::Failed.is_error());
        assert!(!LookupStatus::Filled.is_error());
    }
}
