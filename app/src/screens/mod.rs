//! Screen view-models
//!
//! Each screen holds the state the host UI renders (pending flags, error
//! banners, list items) and exposes the async operations the UI triggers.
//! Buttons stay disabled while their operation is pending; the screens
//! refuse re-entry accordingly.

mod card_form;
mod payment_screen;
mod video_screen;

pub use card_form::{CardFormState, FieldError};
pub use payment_screen::{PaymentScreen, PaymentScreenEvent};
pub use video_screen::{ComposerAction, HistoryPanel, VideoComposerScreen};
