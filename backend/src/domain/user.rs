//! User data model.
//!
//! One family of types serves every operation: [`UserDraft`] is the validated
//! input for create and update, [`NewUserRecord`] is what the store persists
//! once the password has been digested, and [`User`] is the read model, which
//! never carries a password.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

/// Validation errors raised while building user values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    /// Identifier is not a base-10 integer.
    InvalidId,
    /// Name is empty once trimmed.
    EmptyName,
    /// Email is empty once trimmed.
    EmptyEmail,
    /// Password is empty.
    EmptyPassword,
    /// Age is zero or negative.
    NonPositiveAge,
    /// Email does not match the accepted address shape.
    InvalidEmail,
}

impl UserValidationError {
    /// Field the error refers to, as named in request payloads.
    pub fn field(self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
            Self::NonPositiveAge => "age",
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::EmptyEmail => "empty_email",
            Self::EmptyPassword => "empty_password",
            Self::NonPositiveAge => "non_positive_age",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "invalid user id"),
            Self::EmptyName | Self::EmptyEmail | Self::EmptyPassword | Self::NonPositiveAge => {
                write!(f, "all fields are required and age must be positive")
            }
            Self::InvalidEmail => write!(f, "invalid email format"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }
}

/// Human readable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address.
///
/// # Examples
/// ```
/// use users_service::domain::EmailAddress;
///
/// assert!(EmailAddress::new("user@example.com").is_ok());
/// assert!(EmailAddress::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Strictly positive age in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age(i64);

impl Age {
    /// Validate and construct an [`Age`].
    pub fn new(age: i64) -> Result<Self, UserValidationError> {
        if age <= 0 {
            return Err(UserValidationError::NonPositiveAge);
        }
        Ok(Self(age))
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Plaintext password as submitted by a client.
///
/// The buffer is zeroised on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`].
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = Zeroizing::new(password.into());
        if password.trim().is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(password))
    }

    /// Borrow the plaintext for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Stored password digest (PHC string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest produced by a password hasher.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Application user as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    age: Age,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, name: UserName, email: EmailAddress, age: Age) -> Self {
        Self {
            id,
            name,
            email,
            age,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Age in years.
    pub fn age(&self) -> Age {
        self.age
    }
}

/// Validated input for creating or replacing a user.
///
/// Checks run in a fixed order: required fields first, then the email
/// format. Uniqueness is checked later against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: UserName,
    email: EmailAddress,
    age: Age,
    password: Password,
}

impl UserDraft {
    /// Validate raw request values.
    ///
    /// # Examples
    /// ```
    /// use users_service::domain::{UserDraft, UserValidationError};
    ///
    /// let draft = UserDraft::try_from_parts("Ann", "ann@x.com", 30, "p").expect("valid draft");
    /// assert_eq!(draft.email().as_ref(), "ann@x.com");
    ///
    /// let err = UserDraft::try_from_parts("", "not-an-email", 30, "p").unwrap_err();
    /// assert_eq!(err, UserValidationError::EmptyName);
    /// ```
    pub fn try_from_parts(
        name: impl Into<String>,
        email: impl Into<String>,
        age: i64,
        password: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let email = email.into();
        let name = UserName::new(name)?;
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let password = Password::new(password)?;
        let age = Age::new(age)?;
        let email = EmailAddress::new(email)?;

        Ok(Self {
            name,
            email,
            age,
            password,
        })
    }

    /// Email the draft will be stored under.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password awaiting a digest.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Swap the plaintext password for its digest.
    pub fn into_record(self, password: PasswordDigest) -> NewUserRecord {
        let Self {
            name, email, age, ..
        } = self;
        NewUserRecord {
            name,
            email,
            age,
            password,
        }
    }
}

/// User fields as written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    name: UserName,
    email: EmailAddress,
    age: Age,
    password: PasswordDigest,
}

impl NewUserRecord {
    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Age in years.
    pub fn age(&self) -> Age {
        self.age
    }

    /// Password digest.
    pub fn password(&self) -> &PasswordDigest {
        &self.password
    }
}
