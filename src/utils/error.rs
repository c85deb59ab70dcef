use thiserror::Error;

#[derive(Error, Debug)]
pub enum SantaError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Input file {path} is not a json file")]
    UnsupportedInputFormat { path: String },

    #[error("Malformed participant list: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("Participant #{index} is invalid: {reason}")]
    InvalidParticipant { index: usize, reason: String },

    #[error("Participant list is empty")]
    EmptyParticipants,

    #[error("Invalid argument {argument}: {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot generate matches from an empty participant list")]
    EmptyInput,

    #[error("Failed to load template {path}: {message}")]
    TemplateLoad { path: String, message: String },

    #[error("Failed to render template: {message}")]
    TemplateRender { message: String },

    #[error("Mail transport unavailable: {message}")]
    TransportUnavailable { message: String },

    #[error("Message to {address} was rejected: {message}")]
    SendRejected { address: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SantaError>;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Some notifications could not be delivered.
pub const EXIT_PARTIAL_DELIVERY: i32 = 2;
pub const EXIT_CONFIG_ERROR: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Generation,
    Template,
    Transport,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SantaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SantaError::InputNotFound { .. }
            | SantaError::UnsupportedInputFormat { .. }
            | SantaError::MalformedInput(_)
            | SantaError::InvalidParticipant { .. }
            | SantaError::EmptyParticipants
            | SantaError::InvalidArgument { .. }
            | SantaError::IoError(_) => ErrorCategory::Input,
            SantaError::EmptyInput => ErrorCategory::Generation,
            SantaError::TemplateLoad { .. } | SantaError::TemplateRender { .. } => {
                ErrorCategory::Template
            }
            SantaError::TransportUnavailable { .. } | SantaError::SendRejected { .. } => {
                ErrorCategory::Transport
            }
            SantaError::MissingConfigError { .. } | SantaError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    /// Per-message failures are `Medium`: they are recorded in the report and
    /// the batch keeps going. Everything else stops the run.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SantaError::TemplateRender { .. } | SantaError::SendRejected { .. } => {
                ErrorSeverity::Medium
            }
            SantaError::MissingConfigError { .. } | SantaError::InvalidConfigValueError { .. } => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    /// Process exit code for a run that stopped on this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Critical => EXIT_CONFIG_ERROR,
            _ => EXIT_FAILURE,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SantaError::InputNotFound { .. } => {
                "Check the path passed to `run` or via --file"
            }
            SantaError::UnsupportedInputFormat { .. } => "Provide a file with a .json extension",
            SantaError::MalformedInput(_) => {
                "The file must be a JSON array of {\"name\", \"email\", \"wishlist\"} objects"
            }
            SantaError::InvalidParticipant { .. } => {
                "Every participant needs a non-empty name and email"
            }
            SantaError::EmptyParticipants | SantaError::EmptyInput => {
                "Add at least one participant to the input file"
            }
            SantaError::InvalidArgument { .. } => "Run `secret-santa run --help` for usage",
            SantaError::IoError(_) => "Check file permissions and available disk space",
            SantaError::TemplateLoad { .. } => {
                "Check the --template path and the template syntax"
            }
            SantaError::TemplateRender { .. } => {
                "Templates may only reference giver.* and recipient.* fields (name, email, wishlist)"
            }
            SantaError::TransportUnavailable { .. } => {
                "Verify EMAIL_HOST, EMAIL_PORT, EMAIL_USER and EMAIL_PASSWORD, and that the server is reachable"
            }
            SantaError::SendRejected { .. } => "Check the participant's email address",
            SantaError::MissingConfigError { .. } | SantaError::InvalidConfigValueError { .. } => {
                "Set the EMAIL_* variables in the environment or in a .env file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        if let SantaError::InvalidArgument { .. } = self {
            return format!("Bad command line: {}", self);
        }
        match self.category() {
            ErrorCategory::Input => format!("Could not read the participant list: {}", self),
            ErrorCategory::Generation => format!("Could not generate matches: {}", self),
            ErrorCategory::Template => format!("Email template problem: {}", self),
            ErrorCategory::Transport => format!("Could not send email: {}", self),
            ErrorCategory::Configuration => format!("Mail configuration problem: {}", self),
        }
    }
}
