//! Projects the record store into the `userList` cards.
//! Every mutation rebuilds the whole list.

use domain::UserRecord;
use std::fmt;

pub const NO_DATA: &str = "No data found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Edit(String),
    Delete(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// 1-based position in the list.
    pub index: usize,
    pub record_id: String,
    pub full_name: String,
    pub email: String,
    pub birth_date: String,
    pub state: String,
    pub gender: String,
    pub hobbies: String,
}

impl Card {
    pub fn from_record(index: usize, user: &UserRecord) -> Self {
        let hobbies: Vec<&str> = user.hobbies.iter().map(|hobby| hobby.as_str()).collect();

        Self {
            index,
            record_id: user.id.clone(),
            full_name: user.full_name(),
            email: user.email.clone(),
            birth_date: user.birth_date_string(),
            state: user.state.clone(),
            gender: user.gender.to_string(),
            hobbies: hobbies.join(", "),
        }
    }

    pub fn actions(&self) -> [CardAction; 2] {
        [
            CardAction::Edit(self.record_id.clone()),
            CardAction::Delete(self.record_id.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedList {
    Empty,
    Cards(Vec<Card>),
}

impl RenderedList {
    pub fn cards(&self) -> &[Card] {
        match self {
            RenderedList::Empty => &[],
            RenderedList::Cards(cards) => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderedList::Empty)
    }
}

pub fn render_list(users: &[UserRecord]) -> RenderedList {
    if users.is_empty() {
        return RenderedList::Empty;
    }

    RenderedList::Cards(
        users
            .iter()
            .enumerate()
            .map(|(position, user)| Card::from_record(position + 1, user))
            .collect(),
    )
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{} {}", self.index, self.full_name)?;
        writeln!(f, "   Email: {}", self.email)?;
        writeln!(f, "   Birth date: {}", self.birth_date)?;
        writeln!(f, "   State: {}", self.state)?;
        writeln!(f, "   Gender: {}", self.gender)?;
        writeln!(f, "   Hobbies: {}", self.hobbies)?;
        write!(f, "   [edit {id}] [delete {id}]", id = self.record_id)
    }
}

impl fmt::Display for RenderedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedList::Empty => f.write_str(NO_DATA),
            RenderedList::Cards(cards) => {
                for (position, card) in cards.iter().enumerate() {
                    if position > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "{card}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::{Gender, Hobby, UserDraft};

    fn user(id: &str, first_name: &str, hobbies: Vec<Hobby>) -> UserRecord {
        UserRecord::from_draft(
            id.to_string(),
            UserDraft {
                first_name: first_name.to_string(),
                last_name: "Lee".to_string(),
                email: "a@b.com".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
                state: "Maine".to_string(),
                gender: Gender::Male,
                hobbies,
                password: "Abcdef1!".to_string(),
                confirm_password: "Abcdef1!".to_string(),
            },
        )
    }

    #[test]
    fn empty_store_renders_placeholder() {
        let list = render_list(&[]);

        assert!(list.is_empty());
        assert!(list.cards().is_empty());
        assert_eq!(list.to_string(), NO_DATA);
    }

    #[test]
    fn cards_follow_store_order_with_one_based_index() {
        let users = vec![
            user("aaa", "Ann", vec![Hobby::Reading, Hobby::Music]),
            user("bbb", "Bob", Vec::new()),
        ];
        let list = render_list(&users);
        let cards = list.cards();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].index, 1);
        assert_eq!(cards[0].full_name, "Ann Lee");
        assert_eq!(cards[0].hobbies, "reading, music");
        assert_eq!(cards[0].birth_date, "1999-12-31");
        assert_eq!(cards[1].index, 2);
        assert_eq!(cards[1].hobbies, "");
        assert_eq!(
            cards[1].actions(),
            [CardAction::Edit("bbb".into()), CardAction::Delete("bbb".into())]
        );
    }

    #[test]
    fn text_rendering_shows_card_fields() {
        let list = render_list(&[user("aaa", "Ann", vec![Hobby::Travel])]);
        let text = list.to_string();

        assert!(text.starts_with("#1 Ann Lee"));
        assert!(text.contains("Gender: male"));
        assert!(text.contains("Hobbies: travel"));
        assert!(text.contains("[edit aaa] [delete aaa]"));
    }
}
