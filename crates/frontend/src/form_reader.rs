//! Reads the current state of every control into plain values.

use domain::validation::parse_birth_date;
use domain::{DomainError, Gender, Hobby, UserDraft};
use std::str::FromStr;

use crate::document::{FieldId, FormDocument};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birthday: String,
    pub state: String,
    pub gender: String,
    pub hobbies: Vec<String>,
    pub password: String,
    pub confirm_password: String,
}

pub fn read_form(document: &FormDocument) -> FormValues {
    let checked = |id: FieldId| {
        document
            .control(id)
            .map(|control| control.checked_values())
            .unwrap_or_default()
    };

    FormValues {
        id: document.value(FieldId::Id),
        first_name: document.value(FieldId::FirstName),
        last_name: document.value(FieldId::LastName),
        email: document.value(FieldId::Email),
        birthday: document.value(FieldId::Birthday),
        state: document.value(FieldId::State),
        gender: checked(FieldId::Gender).into_iter().next().unwrap_or_default(),
        hobbies: checked(FieldId::Hobby),
        password: document.value(FieldId::Password),
        confirm_password: document.value(FieldId::ConfirmPassword),
    }
}

impl FormValues {
    /// Converts validated form values into a record draft.
    pub fn into_draft(self) -> Result<UserDraft, DomainError> {
        let birth_date = parse_birth_date(&self.birthday)
            .ok_or_else(|| DomainError::Validation(format!("Invalid birth date: {}", self.birthday)))?;
        let gender = Gender::from_str(&self.gender)?;
        let hobbies = self
            .hobbies
            .iter()
            .map(|hobby| Hobby::from_str(hobby))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UserDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            birth_date,
            state: self.state,
            gender,
            hobbies,
            password: self.password,
            confirm_password: self.confirm_password,
        })
    }
}
