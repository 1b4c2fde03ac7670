use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Date format shared by the birthday control and rendered cards.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("Unknown gender: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hobby {
    Reading,
    Music,
    Sports,
    Travel,
}

impl Hobby {
    /// Checklist order, which is also the order selections are read back in.
    pub const ALL: [Hobby; 4] = [Hobby::Reading, Hobby::Music, Hobby::Sports, Hobby::Travel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Hobby::Reading => "reading",
            Hobby::Music => "music",
            Hobby::Sports => "sports",
            Hobby::Travel => "travel",
        }
    }
}

impl fmt::Display for Hobby {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hobby {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hobby::ALL
            .into_iter()
            .find(|hobby| hobby.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("Unknown hobby: {s}")))
    }
}

/// Field values of a user before an identifier has been assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub state: String,
    pub gender: Gender,
    pub hobbies: Vec<Hobby>,
    pub password: String,
    pub confirm_password: String,
}

/// Core user record held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub state: String,
    pub gender: Gender,
    pub hobbies: Vec<Hobby>,
    pub password: String,
    pub confirm_password: String,
}

impl UserRecord {
    pub fn from_draft(id: String, draft: UserDraft) -> Self {
        let UserDraft {
            first_name,
            last_name,
            email,
            birth_date,
            state,
            gender,
            hobbies,
            password,
            confirm_password,
        } = draft;

        Self {
            id,
            first_name,
            last_name,
            email,
            birth_date,
            state,
            gender,
            hobbies,
            password,
            confirm_password,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn birth_date_string(&self) -> String {
        self.birth_date.format(DATE_FORMAT).to_string()
    }

    pub fn has_hobby(&self, hobby: Hobby) -> bool {
        self.hobbies.contains(&hobby)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> UserDraft {
        UserDraft {
            first_name: "Anna".to_string(),
            last_name: "O'Neil".to_string(),
            email: "a@b.com".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            state: "Oregon".to_string(),
            gender: Gender::Female,
            hobbies: vec![Hobby::Reading, Hobby::Travel],
            password: "Abcdef1!".to_string(),
            confirm_password: "Abcdef1!".to_string(),
        }
    }

    #[test]
    fn from_draft_keeps_every_field() {
        let record = UserRecord::from_draft("abc123xyz".to_string(), draft());

        assert_eq!(record.id, "abc123xyz");
        assert_eq!(record.full_name(), "Anna O'Neil");
        assert_eq!(record.birth_date_string(), "2000-01-01");
        assert!(record.has_hobby(Hobby::Travel));
        assert!(!record.has_hobby(Hobby::Music));
    }

    #[test]
    fn gender_and_hobby_parse_their_form_values() {
        assert_eq!("other".parse::<Gender>().unwrap(), Gender::Other);
        assert_eq!("sports".parse::<Hobby>().unwrap(), Hobby::Sports);
        assert!("".parse::<Gender>().is_err());
        assert!("Reading".parse::<Hobby>().is_err());
    }
}
