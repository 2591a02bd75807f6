//! Contact form
//!
//! Draft editing, validation, a single delivery attempt per submit, and the
//! Idle → Sent → Idle / Failed lifecycle with its notices.

mod form;
mod notice;

pub use form::{ContactForm, FormError, SubmissionOutcome, SENT_RESET_AFTER};
pub use notice::{Notice, NoticeKind, MSG_SEND_FAILED, MSG_SENT};
