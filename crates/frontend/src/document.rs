//! In-memory model of the registration page.
//!
//! The page is a set of named controls inside `form-container`, a submit
//! button whose identity flips between `submit-btn` and `update-btn`, the
//! `userList` mount and the `alert-view` banner. Controls carry their own
//! error slot, mirroring the span that sits next to each input.

use domain::validation::FieldRule;
use domain::{Gender, Hobby, UserRecord};
use std::fmt;
use std::str::FromStr;

pub const FORM_CONTAINER: &str = "form-container";
pub const USER_LIST: &str = "userList";
pub const ALERT_VIEW: &str = "alert-view";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    Birthday,
    State,
    Gender,
    Hobby,
    Password,
    ConfirmPassword,
    Id,
}

impl FieldId {
    /// Document order of the form's controls.
    pub const ALL: [FieldId; 10] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::Birthday,
        FieldId::State,
        FieldId::Gender,
        FieldId::Hobby,
        FieldId::Password,
        FieldId::ConfirmPassword,
        FieldId::Id,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::FirstName => "fname",
            FieldId::LastName => "lname",
            FieldId::Email => "email",
            FieldId::Birthday => "birthday",
            FieldId::State => "state",
            FieldId::Gender => "gender",
            FieldId::Hobby => "hobby",
            FieldId::Password => "password",
            FieldId::ConfirmPassword => "confirm-password",
            FieldId::Id => "id",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown field: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub checked: bool,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            checked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Date,
    Password,
    Hidden,
    Radio(Vec<ChoiceOption>),
    Checkbox(Vec<ChoiceOption>),
}

/// The error span attached to a control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    pub flagged: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: FieldId,
    pub kind: ControlKind,
    pub value: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub rule: Option<FieldRule>,
    pub error: ErrorSlot,
}

impl Control {
    pub fn new(id: FieldId, kind: ControlKind) -> Self {
        Self {
            id,
            kind,
            value: String::new(),
            placeholder: None,
            required: false,
            rule: None,
            error: ErrorSlot::default(),
        }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ControlKind::Radio(_) | ControlKind::Checkbox(_))
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            ControlKind::Radio(options) | ControlKind::Checkbox(options) => options,
            _ => &[],
        }
    }

    fn options_mut(&mut self) -> Option<&mut Vec<ChoiceOption>> {
        match &mut self.kind {
            ControlKind::Radio(options) | ControlKind::Checkbox(options) => Some(options),
            _ => None,
        }
    }

    /// Values of checked options in document order.
    pub fn checked_values(&self) -> Vec<String> {
        self.options()
            .iter()
            .filter(|option| option.checked)
            .map(|option| option.value.clone())
            .collect()
    }

    /// The string a validator sees: the typed value for inputs, the first
    /// checked option for groups.
    pub fn current_value(&self) -> String {
        match &self.kind {
            ControlKind::Radio(_) | ControlKind::Checkbox(_) => {
                self.checked_values().into_iter().next().unwrap_or_default()
            }
            _ => self.value.clone(),
        }
    }

    /// Checks `value`; a radio group unchecks its other options.
    pub fn check(&mut self, value: &str) -> bool {
        let is_radio = matches!(self.kind, ControlKind::Radio(_));
        let Some(options) = self.options_mut() else {
            return false;
        };
        if !options.iter().any(|option| option.value == value) {
            return false;
        }

        for option in options.iter_mut() {
            if option.value == value {
                option.checked = true;
            } else if is_radio {
                option.checked = false;
            }
        }
        true
    }

    pub fn uncheck(&mut self, value: &str) -> bool {
        let Some(options) = self.options_mut() else {
            return false;
        };
        match options.iter_mut().find(|option| option.value == value) {
            Some(option) => {
                option.checked = false;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        if let Some(options) = self.options_mut() {
            for option in options.iter_mut() {
                option.checked = false;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub id: &'static str,
    pub label: &'static str,
}

impl SubmitButton {
    pub const SUBMIT: SubmitButton = SubmitButton {
        id: "submit-btn",
        label: "Submit",
    };
    pub const UPDATE: SubmitButton = SubmitButton {
        id: "update-btn",
        label: "Update",
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDocument {
    controls: Vec<Control>,
    pub submit_button: SubmitButton,
    scroll_requested: bool,
}

impl Default for FormDocument {
    fn default() -> Self {
        Self::registration()
    }
}

impl FormDocument {
    pub fn new(controls: Vec<Control>) -> Self {
        Self {
            controls,
            submit_button: SubmitButton::SUBMIT,
            scroll_requested: false,
        }
    }

    /// The registration form with its fixed fields, options and rules.
    pub fn registration() -> Self {
        let genders: Vec<ChoiceOption> = Gender::ALL.iter().map(|g| ChoiceOption::new(g.as_str())).collect();
        let hobbies: Vec<ChoiceOption> = Hobby::ALL.iter().map(|h| ChoiceOption::new(h.as_str())).collect();

        Self::new(vec![
            Control::new(FieldId::FirstName, ControlKind::Text)
                .placeholder("first name")
                .required()
                .rule(FieldRule::Name),
            Control::new(FieldId::LastName, ControlKind::Text)
                .placeholder("last name")
                .required()
                .rule(FieldRule::Name),
            Control::new(FieldId::Email, ControlKind::Text)
                .placeholder("email")
                .required()
                .rule(FieldRule::Email),
            Control::new(FieldId::Birthday, ControlKind::Date)
                .required()
                .rule(FieldRule::BirthDate),
            Control::new(FieldId::State, ControlKind::Text)
                .placeholder("state")
                .required()
                .rule(FieldRule::Presence),
            Control::new(FieldId::Gender, ControlKind::Radio(genders))
                .required()
                .rule(FieldRule::Presence),
            Control::new(FieldId::Hobby, ControlKind::Checkbox(hobbies)),
            Control::new(FieldId::Password, ControlKind::Password)
                .placeholder("password")
                .required()
                .rule(FieldRule::Password),
            Control::new(FieldId::ConfirmPassword, ControlKind::Password)
                .placeholder("confirm password")
                .required()
                .rule(FieldRule::ConfirmPassword),
            Control::new(FieldId::Id, ControlKind::Hidden),
        ])
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut [Control] {
        &mut self.controls
    }

    pub fn control(&self, id: FieldId) -> Option<&Control> {
        self.controls.iter().find(|control| control.id == id)
    }

    pub fn control_mut(&mut self, id: FieldId) -> Option<&mut Control> {
        self.controls.iter_mut().find(|control| control.id == id)
    }

    /// Value of a text-like control, `""` when the control is absent.
    pub fn value(&self, id: FieldId) -> String {
        self.control(id)
            .map(|control| control.value.clone())
            .unwrap_or_default()
    }

    /// Types into a text-like control. Groups are changed with [`Self::check`].
    pub fn set_value(&mut self, id: FieldId, value: &str) -> bool {
        match self.control_mut(id) {
            Some(control) if !control.is_group() => {
                control.value = value.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn check(&mut self, id: FieldId, value: &str) -> bool {
        self.control_mut(id).is_some_and(|control| control.check(value))
    }

    pub fn uncheck(&mut self, id: FieldId, value: &str) -> bool {
        self.control_mut(id).is_some_and(|control| control.uncheck(value))
    }

    pub fn error_text(&self, id: FieldId) -> &str {
        self.control(id)
            .map(|control| control.error.text.as_str())
            .unwrap_or("")
    }

    /// Copies a stored record into every control, selections included.
    pub fn fill_from(&mut self, user: &UserRecord) {
        self.clear_values();
        self.set_value(FieldId::FirstName, &user.first_name);
        self.set_value(FieldId::LastName, &user.last_name);
        self.set_value(FieldId::Email, &user.email);
        self.set_value(FieldId::Birthday, &user.birth_date_string());
        self.set_value(FieldId::State, &user.state);
        self.check(FieldId::Gender, user.gender.as_str());
        for hobby in &user.hobbies {
            self.check(FieldId::Hobby, hobby.as_str());
        }
        self.set_value(FieldId::Password, &user.password);
        self.set_value(FieldId::ConfirmPassword, &user.confirm_password);
        self.set_value(FieldId::Id, &user.id);
    }

    pub fn clear_values(&mut self) {
        for control in &mut self.controls {
            control.clear();
        }
    }

    pub fn request_scroll(&mut self) {
        self.scroll_requested = true;
    }

    /// Returns whether a scroll-into-view was requested since the last call.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }
}

impl fmt::Display for FormDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{FORM_CONTAINER}]")?;
        for control in &self.controls {
            match &control.kind {
                ControlKind::Hidden => writeln!(f, "  {} (hidden) = {:?}", control.id, control.value)?,
                ControlKind::Password => {
                    let masked = "*".repeat(control.value.chars().count());
                    writeln!(f, "  {} = {}", control.id, masked)?
                }
                ControlKind::Radio(options) | ControlKind::Checkbox(options) => {
                    let rendered: Vec<String> = options
                        .iter()
                        .map(|option| {
                            let mark = if option.checked { "x" } else { " " };
                            format!("[{mark}] {}", option.value)
                        })
                        .collect();
                    writeln!(f, "  {} = {}", control.id, rendered.join(" "))?
                }
                ControlKind::Text | ControlKind::Date => {
                    writeln!(f, "  {} = {:?}", control.id, control.value)?
                }
            }
            if control.error.flagged {
                writeln!(f, "    ! {}", control.error.text)?;
            }
        }
        write!(f, "  <{}> {}", self.submit_button.id, self.submit_button.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_form_declares_every_field() {
        let doc = FormDocument::registration();
        let ids: Vec<&str> = doc.controls().iter().map(|c| c.id.as_str()).collect();

        assert_eq!(
            ids,
            [
                "fname",
                "lname",
                "email",
                "birthday",
                "state",
                "gender",
                "hobby",
                "password",
                "confirm-password",
                "id"
            ]
        );
        assert_eq!(doc.submit_button, SubmitButton::SUBMIT);
    }

    #[test]
    fn field_ids_parse_from_their_names() {
        assert_eq!("confirm-password".parse::<FieldId>(), Ok(FieldId::ConfirmPassword));
        assert!("nickname".parse::<FieldId>().is_err());
    }

    #[test]
    fn radio_keeps_a_single_selection() {
        let mut doc = FormDocument::registration();

        assert!(doc.check(FieldId::Gender, "male"));
        assert!(doc.check(FieldId::Gender, "female"));
        assert!(!doc.check(FieldId::Gender, "robot"));

        let gender = doc.control(FieldId::Gender).unwrap();
        assert_eq!(gender.checked_values(), ["female"]);
        assert_eq!(gender.current_value(), "female");
    }

    #[test]
    fn checkboxes_accumulate_in_document_order() {
        let mut doc = FormDocument::registration();
        doc.check(FieldId::Hobby, "travel");
        doc.check(FieldId::Hobby, "reading");
        doc.check(FieldId::Hobby, "music");
        doc.uncheck(FieldId::Hobby, "music");

        let hobby = doc.control(FieldId::Hobby).unwrap();
        assert_eq!(hobby.checked_values(), ["reading", "travel"]);
    }

    #[test]
    fn set_value_refuses_groups() {
        let mut doc = FormDocument::registration();

        assert!(doc.set_value(FieldId::Email, "a@b.com"));
        assert!(!doc.set_value(FieldId::Gender, "male"));
        assert_eq!(doc.value(FieldId::Email), "a@b.com");
    }

    #[test]
    fn scroll_request_is_consumed_once() {
        let mut doc = FormDocument::registration();
        doc.request_scroll();

        assert!(doc.take_scroll_request());
        assert!(!doc.take_scroll_request());
    }
}
