//! Account shapes, request DTOs, and the stored record.

use crate::primitives::{AccountId, EpochMillis, PrimitiveError, normalize_label};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use storefront_shared::{ErrorCode, ErrorEnvelope, SecretString, Validated};
use storefront_validation::{Constraint, Dto, ShapeDescriptor, ShapeError};

/// Longest accepted account name, in characters.
pub const NAME_MAX_LENGTH: usize = 50;
/// Shortest accepted password, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;
/// Longest accepted password, in characters.
pub const PASSWORD_MAX_LENGTH: usize = 100;

const INVALID_EMAIL: &str = "Please enter a valid email";

static CREATE_AUTH: LazyLock<Result<ShapeDescriptor, ShapeError>> =
    LazyLock::new(|| account_shape("create-auth", false));
static UPDATE_AUTH: LazyLock<Result<ShapeDescriptor, ShapeError>> =
    LazyLock::new(|| account_shape("update-auth", true));
static LOGIN: LazyLock<Result<ShapeDescriptor, ShapeError>> = LazyLock::new(|| {
    ShapeDescriptor::builder("login")
        .field(
            "email",
            [
                Constraint::required(),
                Constraint::email().with_message(INVALID_EMAIL),
            ],
        )
        .field("password", [Constraint::required(), Constraint::string()])
        .build()
});

fn account_shape(name: &str, partial: bool) -> Result<ShapeDescriptor, ShapeError> {
    // Update bodies may omit a field, but a present one must not be empty.
    let presence = || {
        if partial {
            vec![Constraint::optional(), Constraint::required()]
        } else {
            vec![Constraint::required()]
        }
    };
    ShapeDescriptor::builder(name)
        .field(
            "name",
            presence().into_iter().chain([
                Constraint::string(),
                Constraint::max_length(NAME_MAX_LENGTH),
            ]),
        )
        .field(
            "email",
            presence()
                .into_iter()
                .chain([Constraint::email().with_message(INVALID_EMAIL)]),
        )
        .field(
            "password",
            presence().into_iter().chain([
                Constraint::string(),
                Constraint::min_length(PASSWORD_MIN_LENGTH)
                    .with_message("Password must be at least 6 characters long"),
                Constraint::max_length(PASSWORD_MAX_LENGTH)
                    .with_message("Password must not exceed 100 characters"),
            ]),
        )
        .build()
}

/// Descriptor for signup payloads.
pub fn create_auth_shape() -> Result<&'static ShapeDescriptor, ShapeError> {
    CREATE_AUTH.as_ref().map_err(ShapeError::clone)
}

/// Descriptor for account update payloads; omitted fields are skipped.
pub fn update_auth_shape() -> Result<&'static ShapeDescriptor, ShapeError> {
    UPDATE_AUTH.as_ref().map_err(ShapeError::clone)
}

/// Descriptor for login payloads.
pub fn login_shape() -> Result<&'static ShapeDescriptor, ShapeError> {
    LOGIN.as_ref().map_err(ShapeError::clone)
}

/// Signup body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateAuthDto {
    /// Display name, up to 50 characters.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plain-text password, 6 to 100 characters.
    #[schemars(with = "String")]
    pub password: SecretString,
}

impl Dto for CreateAuthDto {
    fn shape() -> Result<&'static ShapeDescriptor, ShapeError> {
        create_auth_shape()
    }
}

/// Account update body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateAuthDto {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New login email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub password: Option<SecretString>,
}

impl Dto for UpdateAuthDto {
    fn shape() -> Result<&'static ShapeDescriptor, ShapeError> {
        update_auth_shape()
    }
}

/// Login body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LoginDto {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    #[schemars(with = "String")]
    pub password: SecretString,
}

impl Dto for LoginDto {
    fn shape() -> Result<&'static ShapeDescriptor, ShapeError> {
        login_shape()
    }
}

/// Normalized signup ready for the account store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Trimmed, lower-cased name.
    pub name: String,
    /// Email as submitted.
    pub email: String,
    /// Plain-text password; the store hashes it.
    pub password: SecretString,
}

impl NewAccount {
    /// Normalize a validated signup payload.
    pub fn from_dto(dto: Validated<CreateAuthDto>) -> Result<Self, PrimitiveError> {
        let dto = dto.into_inner();
        Ok(Self {
            name: normalize_label("name", &dto.name)?,
            email: dto.email,
            password: dto.password,
        })
    }
}

/// Stored account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Record identifier.
    pub id: AccountId,
    /// Normalized name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Password digest produced by the store.
    pub password_hash: SecretString,
    /// Creation time.
    pub created_at: EpochMillis,
    /// Last modification time.
    pub updated_at: EpochMillis,
}

/// Claims carried by an issued session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account identifier.
    pub id: AccountId,
    /// Account email.
    pub email: String,
    /// Account name.
    pub name: String,
}

impl From<&Account> for SessionClaims {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
        }
    }
}

/// Error returned when signup reuses a registered email.
#[must_use]
pub fn email_already_exists() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::new("auth", "email_exists"), "Email already Exists")
}

/// Error returned when login names an unknown email.
#[must_use]
pub fn account_not_found() -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new("auth", "account_not_found"),
        "User not found, Please signup",
    )
}

/// Error returned when the password does not match.
#[must_use]
pub fn invalid_credentials() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::new("auth", "invalid_credentials"), "Invalid Credentials")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_validation::{validate, validate_dto};

    #[test]
    fn signup_reports_configured_messages() -> Result<(), ShapeError> {
        let outcome = validate(
            create_auth_shape()?,
            &json!({ "name": "Ada", "email": "ada@", "password": "123" }),
        );
        assert_eq!(
            outcome.messages(),
            [
                "email: Please enter a valid email",
                "password: Password must be at least 6 characters long",
            ]
        );
        Ok(())
    }

    #[test]
    fn overlong_password_uses_custom_message() -> Result<(), ShapeError> {
        let outcome = validate(
            create_auth_shape()?,
            &json!({ "name": "Ada", "email": "ada@example.com", "password": "x".repeat(101) }),
        );
        assert_eq!(
            outcome.messages(),
            ["password: Password must not exceed 100 characters"]
        );
        Ok(())
    }

    #[test]
    fn update_auth_accepts_partial_body() -> Result<(), ShapeError> {
        assert!(validate(update_auth_shape()?, &json!({ "name": "grace" })).is_valid());
        let outcome = validate(update_auth_shape()?, &json!({ "email": "nope" }));
        assert_eq!(outcome.messages(), ["email: Please enter a valid email"]);
        Ok(())
    }

    #[test]
    fn update_auth_rejects_present_empty_values() -> Result<(), ShapeError> {
        let outcome = validate(update_auth_shape()?, &json!({ "name": "" }));
        assert_eq!(outcome.messages(), ["name: name should not be empty"]);

        let outcome = validate(update_auth_shape()?, &json!({ "email": "" }));
        assert_eq!(
            outcome.messages(),
            ["email: email should not be empty", "email: Please enter a valid email"]
        );
        Ok(())
    }

    #[test]
    fn new_account_normalizes_name_and_keeps_email() -> Result<(), PrimitiveError> {
        let Ok(dto) = validate_dto::<CreateAuthDto>(&json!({
            "name": "  Ada Lovelace ",
            "email": "Ada@Example.com",
            "password": "hunter22"
        })) else {
            panic!("payload should validate");
        };
        let account = NewAccount::from_dto(dto)?;
        assert_eq!(account.name, "ada lovelace");
        assert_eq!(account.email, "Ada@Example.com");
        assert_eq!(account.password.expose(), "hunter22");
        assert!(!format!("{account:?}").contains("hunter22"));
        Ok(())
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        let Ok(dto) = validate_dto::<CreateAuthDto>(&json!({
            "name": "   ",
            "email": "ada@example.com",
            "password": "hunter22"
        })) else {
            panic!("payload should validate");
        };
        assert_eq!(
            NewAccount::from_dto(dto).err(),
            Some(PrimitiveError::BlankLabel { field: "name" })
        );
    }
}
