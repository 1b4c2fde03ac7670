//! Writes validation results into a control's error slot.

use domain::validation::FieldError;

use crate::document::Control;

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name shown in front of an error message: the placeholder when the
/// control has one, otherwise its identifier.
pub fn field_label(control: &Control) -> String {
    let name = control
        .placeholder
        .as_deref()
        .unwrap_or_else(|| control.id.as_str());
    capitalize_first(name)
}

pub fn add_error(control: &mut Control, message: &str) {
    control.error.flagged = true;
    control.error.text = format!("{} {}", field_label(control), message);
}

pub fn remove_error(control: &mut Control) {
    control.error.flagged = false;
    control.error.text.clear();
}

/// Applies a validator verdict and returns whether it passed.
pub fn present(control: &mut Control, verdict: &Result<(), FieldError>) -> bool {
    match verdict {
        Ok(()) => {
            remove_error(control);
            true
        }
        Err(err) => {
            add_error(control, &err.to_string());
            false
        }
    }
}
