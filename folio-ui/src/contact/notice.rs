use serde::Serialize;
use std::fmt;

pub const MSG_SENT: &str = "Message sent successfully!";
pub const MSG_SEND_FAILED: &str = "Unable to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast shown after a submit attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    /// Success notices fade on their own; errors wait for a dismiss
    pub fn is_self_dismissing(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.kind {
            NoticeKind::Success => "✅",
            NoticeKind::Error => "❌",
        };
        write!(f, "{} {}", icon, self.text)
    }
}
