//! Presentation side of the registration form: the page model, error
//! annotations, form reading, card rendering, the status banner and the
//! controller that ties them to the record store.

pub mod banner;
pub mod controller;
pub mod document;
pub mod error_presenter;
pub mod form_reader;
pub mod list_renderer;

pub use banner::StatusBanner;
pub use controller::{Confirmation, DeleteOutcome, FormController, FormMode, SubmitOutcome};
pub use document::{Control, ControlKind, FieldId, FormDocument, SubmitButton};
pub use form_reader::{read_form, FormValues};
pub use list_renderer::{render_list, Card, CardAction, RenderedList};
