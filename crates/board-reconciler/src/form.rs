//! Add/edit form values.

/// Raw values of the order form as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    /// What was ordered.
    pub text: String,
    /// Table number.
    pub table: String,
}

/// Form values that passed validation, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFields {
    /// Trimmed order text.
    pub text: String,
    /// Trimmed table.
    pub table: String,
}

impl FormFields {
    /// Creates form values.
    pub fn new(text: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            table: table.into(),
        }
    }

    /// Trims both fields and returns them if neither is empty.
    pub fn validate(&self) -> Option<ValidFields> {
        let text = self.text.trim();
        let table = self.table.trim();
        if text.is_empty() || table.is_empty() {
            return None;
        }
        Some(ValidFields {
            text: text.to_string(),
            table: table.to_string(),
        })
    }

    /// Empties both fields.
    pub fn reset(&mut self) {
        self.text.clear();
        self.table.clear();
    }
}
