//! Request state machine for chain operations.
//!
//! One chain operation may be in flight at a time; `begin` refuses a second
//! trigger instead of relying on a disabled button. Terminal states stick
//! around until the UI acknowledges them back to `Idle`.

use bevy::prelude::Resource;

#[derive(Clone, Debug, Default, PartialEq, Eq, Resource)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight {
        label: String,
    },
    Succeeded {
        label: String,
    },
    Failed {
        label: String,
        error: String,
    },
}

impl RequestState {
    /// Starts a request if none is outstanding. Returns `false` — and leaves
    /// the in-flight request untouched — when one already is.
    pub fn begin(&mut self, label: impl Into<String>) -> bool {
        if matches!(self, RequestState::InFlight { .. }) {
            return false;
        }
        *self = RequestState::InFlight {
            label: label.into(),
        };
        true
    }

    pub fn succeed(&mut self, label: impl Into<String>) {
        *self = RequestState::Succeeded {
            label: label.into(),
        };
    }

    pub fn fail(&mut self, label: impl Into<String>, error: impl Into<String>) {
        *self = RequestState::Failed {
            label: label.into(),
            error: error.into(),
        };
    }

    /// Clears a terminal state; in-flight requests cannot be acknowledged
    /// away (there is no cancellation).
    pub fn acknowledge(&mut self) {
        if !matches!(self, RequestState::InFlight { .. }) {
            *self = RequestState::Idle;
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight { .. })
    }

    pub fn status_line(&self) -> String {
        match self {
            RequestState::Idle => "idle".to_string(),
            RequestState::InFlight { label } => format!("{label}…"),
            RequestState::Succeeded { label } => format!("{label} done"),
            RequestState::Failed { label, error } => format!("{label} failed: {error}"),
        }
    }
}
