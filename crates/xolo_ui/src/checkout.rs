//! Placeholder checkout form. It has no submission handler.

/// Input widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Email address.
    Email,
    /// Multi-line text area.
    Multiline,
}

/// One form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    /// Placeholder shown in the empty field.
    pub placeholder: &'static str,
    /// Widget kind.
    pub kind: FieldKind,
}

const FIELDS: [FormField; 3] = [
    FormField {
        placeholder: "Full Name",
        kind: FieldKind::Text,
    },
    FormField {
        placeholder: "Email Address",
        kind: FieldKind::Email,
    },
    FormField {
        placeholder: "Shipping Address",
        kind: FieldKind::Multiline,
    },
];

/// The checkout card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutForm;

impl CheckoutForm {
    /// Card heading.
    pub const TITLE: &'static str = "Checkout";
    /// Submit button label.
    pub const SUBMIT_LABEL: &'static str = "Place Order";

    /// Fields, top to bottom.
    #[must_use]
    pub fn fields(&self) -> &'static [FormField] {
        &FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_in_order() {
        let labels: Vec<_> = CheckoutForm.fields().iter().map(|f| f.placeholder).collect();
        assert_eq!(labels, ["Full Name", "Email Address", "Shipping Address"]);
        assert_eq!(CheckoutForm.fields()[2].kind, FieldKind::Multiline);
    }
}
