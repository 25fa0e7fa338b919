//! Login and registration form values.
//!
//! Inbound adapters hand raw form strings to these constructors; the auth
//! service only ever sees validated values.

use std::fmt;

use serde_json::{Value, json};
use zeroize::Zeroizing;

/// Shortest password the backend accepts.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Reasons a login form is rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was blank once trimmed.
    EmptyEmail,
    /// Email has no `@`.
    InvalidEmail,
    /// Password is shorter than [`MIN_PASSWORD_LENGTH`] characters.
    PasswordTooShort { min: usize },
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "Please enter your email address"),
            Self::InvalidEmail => write!(f, "Please enter a valid email address"),
            Self::PasswordTooShort { min } => {
                write!(f, "Password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

fn validate_email(raw: &str) -> Result<String, CredentialsValidationError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(CredentialsValidationError::EmptyEmail);
    }
    if !email.contains('@') {
        return Err(CredentialsValidationError::InvalidEmail);
    }
    Ok(email.to_owned())
}

fn validate_password(raw: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if raw.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CredentialsValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(Zeroizing::new(raw.to_owned()))
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and contains `@`.
/// - `password` keeps caller whitespace and is at least
///   [`MIN_PASSWORD_LENGTH`] characters.
///
/// # Examples
/// ```
/// use frontend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.com ", "secret").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw form input.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: validate_email(email)?,
            password: validate_password(password)?,
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// JSON body for `POST /auth/login`.
    pub fn to_request_body(&self) -> Value {
        json!({ "email": self.email, "password": self.password.as_str() })
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Reasons a registration form is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// First name was blank.
    EmptyFirstName,
    /// Last name was blank.
    EmptyLastName,
    /// Email or password failed the login rules.
    Credentials(CredentialsValidationError),
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "Please enter your first name"),
            Self::EmptyLastName => write!(f, "Please enter your last name"),
            Self::Credentials(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<CredentialsValidationError> for RegistrationValidationError {
    fn from(value: CredentialsValidationError) -> Self {
        Self::Credentials(value)
    }
}

/// Raw registration form fields, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password: &'a str,
}

/// Validated registration form.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    password: Zeroizing<String>,
}

impl RegistrationForm {
    /// Validate raw form input. A blank phone number is omitted.
    pub fn try_from_input(
        input: &RegistrationInput<'_>,
    ) -> Result<Self, RegistrationValidationError> {
        let first_name = input.first_name.trim();
        if first_name.is_empty() {
            return Err(RegistrationValidationError::EmptyFirstName);
        }
        let last_name = input.last_name.trim();
        if last_name.is_empty() {
            return Err(RegistrationValidationError::EmptyLastName);
        }
        let phone = Some(input.phone.trim())
            .filter(|phone| !phone.is_empty())
            .map(str::to_owned);

        Ok(Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: validate_email(input.email)?,
            phone,
            password: validate_password(input.password)?,
        })
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// JSON body for `POST /auth/register`.
    pub fn to_request_body(&self) -> Value {
        json!({
            "first_name": self.first_name,
            "last_name": self.last_name,
            "email": self.email,
            "phone": self.phone,
            "password": self.password.as_str(),
        })
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}
