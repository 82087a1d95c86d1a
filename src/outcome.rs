use std::fmt;

/// Classification of one processed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    Failure,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeStatus::Success => write!(f, "success"),
            OutcomeStatus::Failure => write!(f, "failure"),
        }
    }
}

/// Result of processing one row. `detail` holds the HTTP status code for
/// any response the server returned, or the transport error message when
/// the request never completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub uid: String,
    pub status: OutcomeStatus,
    pub detail: String,
}

impl Outcome {
    pub fn success(uid: &str, detail: String) -> Self {
        Self {
            uid: uid.to_string(),
            status: OutcomeStatus::Success,
            detail,
        }
    }

    pub fn failure(uid: &str, detail: String) -> Self {
        Self {
            uid: uid.to_string(),
            status: OutcomeStatus::Failure,
            detail,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.uid, self.status, self.detail)
    }
}
