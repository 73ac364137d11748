//! # Application State
//!
//! Two pieces of state sit between the repository and whatever drives the
//! application (the CLI here):
//!
//! - [`list::DrinkList`]: the loaded collection plus `loading` and `error`.
//!   Every mutation goes through the repository and is followed by a full
//!   reload, so the collection always reflects what the backend holds.
//!   This is the one place errors are recorded for display; they are also
//!   returned so the caller can decide how to report them.
//! - [`form::DrinkForm`]: the editable draft of a drink and its field-level
//!   validation messages. Validation never fails with an error; it fills the
//!   message map.

pub mod form;
pub mod list;

pub use form::{DrinkForm, FormField};
pub use list::DrinkList;
