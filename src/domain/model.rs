use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
    #[serde(default, alias = "wishList")]
    pub wishlist: Vec<String>,
}

impl Participant {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            wishlist: Vec::new(),
        }
    }

    pub fn with_wishlist(mut self, wishlist: Vec<String>) -> Self {
        self.wishlist = wishlist;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub giver: Participant,
    pub recipient: Participant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub to_name: String,
    pub to_address: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Render(String),
    Send(String),
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Render(message) => write!(f, "render failed: {}", message),
            FailureReason::Send(message) => write!(f, "send failed: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    pub assignment: Assignment,
    pub reason: FailureReason,
}

/// Outcome of one dispatch batch. Failures keep the order in which the
/// assignments were processed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub succeeded: usize,
    pub failed: Vec<DispatchFailure>,
}

impl DispatchReport {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub(crate) fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub(crate) fn record_failure(&mut self, assignment: &Assignment, reason: FailureReason) {
        self.failed.push(DispatchFailure {
            assignment: assignment.clone(),
            reason,
        });
    }
}
