use thiserror::Error;

/// Problems with what the user typed. Raised before any request is sent.
#[derive(Debug, Error, PartialEq)]
pub enum UserInputError {
    #[error("latitude and longitude are required")]
    MissingCoordinates,

    #[error("{field} must be a number, got '{value}'")]
    InvalidCoordinate { field: &'static str, value: String },
}

/// Failures talking to the dashboard data service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to reach dashboard service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("dashboard service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode dashboard service response: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    UserInput(#[from] UserInputError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl DashboardError {
    /// Message shown to the user through the alert channel.
    pub fn user_message(&self) -> &'static str {
        match self {
            DashboardError::UserInput(UserInputError::MissingCoordinates) => {
                "Please enter a latitude and longitude."
            }
            DashboardError::UserInput(UserInputError::InvalidCoordinate { .. }) => {
                "Latitude and longitude must be numbers."
            }
            DashboardError::Service(_) => {
                "Could not load dashboard data. Please try again later."
            }
        }
    }
}
