//! Form controller: blur and submit validation, create-or-update dispatch,
//! edit and delete actions from the rendered cards.
//!
//! The controller is either idle (empty form, "Submit") or editing a stored
//! record (form populated, "Update"). Every successful mutation rebuilds the
//! list, posts a banner message and returns the form to idle.

use domain::validation::RuleContext;
use domain::UserService;
use mockable::Clock;
use std::time::Instant;
use tracing::{debug, warn};

use crate::banner::{StatusBanner, USER_ADDED, USER_DELETED, USER_UPDATED};
use crate::document::{Control, FieldId, FormDocument, SubmitButton};
use crate::error_presenter::{present, remove_error};
use crate::form_reader::read_form;
use crate::list_renderer::{render_list, RenderedList};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

/// Blocking yes/no question put to the user before a delete.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Idle,
    Editing { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid,
    Added(String),
    Updated(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    NotFound,
}

pub struct FormController {
    document: FormDocument,
    users: UserService,
    list: RenderedList,
    banner: StatusBanner,
    mode: FormMode,
    clock: Box<dyn Clock>,
    confirmation: Box<dyn Confirmation>,
}

fn validate_control(control: &mut Control, ctx: &RuleContext<'_>) -> bool {
    let Some(rule) = control.rule else {
        return true;
    };
    let verdict = rule.check(&control.current_value(), control.required, ctx);
    present(control, &verdict)
}

impl FormController {
    pub fn new(
        users: UserService,
        banner: StatusBanner,
        clock: Box<dyn Clock>,
        confirmation: Box<dyn Confirmation>,
    ) -> Self {
        let list = render_list(users.users());
        Self {
            document: FormDocument::registration(),
            users,
            list,
            banner,
            mode: FormMode::Idle,
            clock,
            confirmation,
        }
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut FormDocument {
        &mut self.document
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn list(&self) -> &RenderedList {
        &self.list
    }

    pub fn banner(&self) -> &StatusBanner {
        &self.banner
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Validates a single field and refreshes its error slot.
    pub fn blur(&mut self, field: FieldId) -> bool {
        let password = self.document.value(FieldId::Password);
        let today = self.clock.local().date_naive();
        let ctx = RuleContext {
            today,
            password: &password,
        };

        match self.document.control_mut(field) {
            Some(control) => validate_control(control, &ctx),
            None => true,
        }
    }

    /// Validates every field. All error slots are refreshed even after the
    /// first failure.
    pub fn validate_all(&mut self) -> bool {
        let password = self.document.value(FieldId::Password);
        let today = self.clock.local().date_naive();
        let ctx = RuleContext {
            today,
            password: &password,
        };

        let mut valid = true;
        for control in self.document.controls_mut() {
            if !validate_control(control, &ctx) {
                valid = false;
            }
        }
        valid
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.validate_all() {
            debug!("Submit blocked by invalid fields");
            return SubmitOutcome::Invalid;
        }

        let values = read_form(&self.document);
        let id = values.id.clone();
        let draft = match values.into_draft() {
            Ok(draft) => draft,
            Err(err) => {
                warn!(error = %err, "Validated form could not be converted");
                return SubmitOutcome::Invalid;
            }
        };

        let outcome = if self.users.find_by_key(&id).is_some() {
            match self.users.update_user(&id, draft) {
                Ok(user) => {
                    self.banner.announce(USER_UPDATED, Instant::now());
                    SubmitOutcome::Updated(user.id)
                }
                Err(err) => {
                    warn!(error = %err, "Update failed");
                    return SubmitOutcome::Invalid;
                }
            }
        } else {
            let user = self.users.create_user(draft);
            self.banner.announce(USER_ADDED, Instant::now());
            SubmitOutcome::Added(user.id)
        };

        self.rerender();
        self.reset();
        outcome
    }

    /// Loads a stored record into the form for editing.
    pub fn edit(&mut self, id: &str) -> bool {
        let user = match self.users.get_user(id) {
            Ok(user) => user.clone(),
            Err(err) => {
                warn!(error = %err, "Edit requested for a missing user");
                return false;
            }
        };

        for control in self.document.controls_mut() {
            remove_error(control);
        }
        self.document.fill_from(&user);
        self.document.submit_button = SubmitButton::UPDATE;
        self.document.request_scroll();
        self.mode = FormMode::Editing { id: user.id };
        true
    }

    pub fn delete(&mut self, id: &str) -> DeleteOutcome {
        if self.users.find_by_key(id).is_none() {
            warn!(id, "Delete requested for a missing user");
            return DeleteOutcome::NotFound;
        }
        if !self.confirmation.confirm(DELETE_PROMPT) {
            debug!(id, "Delete declined");
            return DeleteOutcome::Declined;
        }

        if let Err(err) = self.users.delete_user(id) {
            warn!(error = %err, "Delete failed");
            return DeleteOutcome::NotFound;
        }

        if matches!(&self.mode, FormMode::Editing { id: editing } if editing == id) {
            self.reset();
        }
        self.rerender();
        self.banner.announce(USER_DELETED, Instant::now());
        DeleteOutcome::Deleted
    }

    /// Clears every control and returns to idle.
    pub fn reset(&mut self) {
        self.document.clear_values();
        for control in self.document.controls_mut() {
            remove_error(control);
        }
        self.document.submit_button = SubmitButton::SUBMIT;
        self.mode = FormMode::Idle;
    }

    fn rerender(&mut self) {
        self.list = render_list(self.users.users());
        debug!(cards = self.list.cards().len(), "User list rebuilt");
    }
}
