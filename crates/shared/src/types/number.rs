//! Human-readable document numbers.
//!
//! Quotes, invoices, and work orders are keyed by the sequential numbers the
//! office actually reads out loud (`Q0042`, `2026-0042`, `WO0042`), so those
//! numbers get the same type-safety treatment as UUID-backed IDs.

use serde::{Deserialize, Serialize};

/// Macro to generate document number wrappers over their string form.
macro_rules! doc_number {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wraps an already-formatted number.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the number as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

doc_number!(QuoteNumber, "Sequential quote number, e.g. `Q0042`.");
doc_number!(
    InvoiceNumber,
    "Year-scoped sequential invoice number, e.g. `2026-0042`."
);
doc_number!(WorkOrderNumber, "Sequential work order number, e.g. `WO0042`.");
doc_number!(Sku, "Allocator-generated stock keeping unit, e.g. `INV-0042`.");
