use crate::utils::error::{Result, SantaError};
use crate::utils::validation::{
    validate_email_address, validate_non_empty_string, validate_range, validate_required_field,
    Validate,
};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Implicit TLS, usually port 465.
    Tls,
    StartTls,
    /// Plain text, for local catchers such as Mailpit.
    None,
}

impl SmtpSecurity {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tls" | "ssl" => Ok(SmtpSecurity::Tls),
            "starttls" => Ok(SmtpSecurity::StartTls),
            "none" | "plain" => Ok(SmtpSecurity::None),
            other => Err(SantaError::InvalidConfigValueError {
                field: "EMAIL_SECURITY".to_string(),
                value: other.to_string(),
                reason: "expected one of tls, starttls, none".to_string(),
            }),
        }
    }

    fn for_port(port: u16) -> Self {
        if port == 465 {
            SmtpSecurity::Tls
        } else {
            SmtpSecurity::StartTls
        }
    }
}

/// SMTP settings, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from_address: String,
    pub security: SmtpSecurity,
}

// Hand-written so the password never reaches the logs.
impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("from_address", &self.from_address)
            .field("security", &self.security)
            .finish()
    }
}

impl MailConfig {
    /// Reads `EMAIL_*` from the process environment, after loading `.env`
    /// if one exists.
    pub fn from_env() -> Result<Self> {
        apply_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads an explicit env file. A missing file is not an error; one that
    /// fails to parse is.
    pub fn load_env_file(path: &Path) -> Result<()> {
        apply_dotenv(dotenvy::from_path(path).map(|_| path.to_path_buf()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = validate_required_field("EMAIL_HOST", &lookup("EMAIL_HOST"))?.clone();
        let raw_port = validate_required_field("EMAIL_PORT", &lookup("EMAIL_PORT"))?.clone();
        let port = raw_port
            .trim()
            .parse::<u16>()
            .map_err(|e| SantaError::InvalidConfigValueError {
                field: "EMAIL_PORT".to_string(),
                value: raw_port.clone(),
                reason: e.to_string(),
            })?;
        let from_address = validate_required_field("EMAIL_FROM", &lookup("EMAIL_FROM"))?.clone();
        let security = match lookup("EMAIL_SECURITY") {
            Some(value) => SmtpSecurity::parse(&value)?,
            None => SmtpSecurity::for_port(port),
        };

        let config = Self {
            host,
            port,
            user: lookup("EMAIL_USER").unwrap_or_default(),
            password: lookup("EMAIL_PASSWORD").unwrap_or_default(),
            from_address,
            security,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn has_credentials(&self) -> bool {
        !self.user.is_empty()
    }
}

fn apply_dotenv(result: std::result::Result<PathBuf, dotenvy::Error>) -> Result<()> {
    match result {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(SantaError::InvalidConfigValueError {
            field: ".env".to_string(),
            value: String::new(),
            reason: e.to_string(),
        }),
    }
}

impl Validate for MailConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("EMAIL_HOST", &self.host)?;
        validate_range("EMAIL_PORT", self.port, 1, u16::MAX)?;
        validate_email_address("EMAIL_FROM", &self.from_address)?;

        if self.user.is_empty() != self.password.is_empty() {
            return Err(SantaError::InvalidConfigValueError {
                field: "EMAIL_USER/EMAIL_PASSWORD".to_string(),
                value: self.user.clone(),
                reason: "user and password must be set together".to_string(),
            });
        }

        Ok(())
    }
}
