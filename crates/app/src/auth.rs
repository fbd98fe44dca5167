//! Signup and login handlers.

use crate::policy::ResponsePolicy;
use crate::respond::{emit, failed, rejected};
use serde_json::Value;
use std::sync::Arc;
use storefront_api::v1::{ApiV1Response, validate_request_body};
use storefront_domain::{
    Account, CreateAuthDto, LoginDto, NewAccount, SessionClaims, account_not_found,
    invalid_credentials,
};
use storefront_ports::{
    AccountStorePort, LogEvent, LogLevel, LoggerPort, PasswordHasherPort, SessionIssuerPort,
};
use storefront_shared::{Result, SecretString};

/// 500 message for signup when internal errors are hidden.
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup Failed";
/// 500 message for login when internal errors are hidden.
pub const LOGIN_FAILED_MESSAGE: &str = "Login Failed";

/// Dependencies required by the auth handlers.
#[derive(Clone)]
pub struct AuthDeps {
    /// Account collection.
    pub accounts: Arc<dyn AccountStorePort>,
    /// Password hasher.
    pub hasher: Arc<dyn PasswordHasherPort>,
    /// Session token issuer.
    pub sessions: Arc<dyn SessionIssuerPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
    /// Environment-dependent response behavior.
    pub policy: ResponsePolicy,
}

/// `POST /api/auth/signup`.
///
/// 200 on success, 400 on validation failure or a blank name, 409 when the
/// email is taken.
#[tracing::instrument(name = "auth.signup", skip_all)]
pub async fn signup(deps: &AuthDeps, body: Value) -> ApiV1Response {
    let dto = match validate_request_body::<CreateAuthDto>(body).await {
        Ok(dto) => dto,
        Err(response) => {
            return rejected(deps.logger.as_ref(), "auth.signup.rejected", response);
        },
    };

    let result = match NewAccount::from_dto(dto) {
        Ok(account) => register(deps, account).await,
        Err(error) => Err(error.into()),
    };
    match result {
        Ok(account) => {
            emit(
                deps.logger.as_ref(),
                LogEvent::new(LogLevel::Info, "auth.signup.succeeded", "Account registered")
                    .with_field("accountId", account.id.to_string()),
            );
            ApiV1Response::ok_message("Signup Successful")
        },
        Err(error) => failed(
            deps.logger.as_ref(),
            "auth.signup.failed",
            &error,
            SIGNUP_FAILED_MESSAGE,
            deps.policy.expose_internal_errors,
        ),
    }
}

/// `POST /api/auth/login`.
///
/// 200 with a session cookie on success; 404 for an unknown email and 401
/// for a wrong password.
#[tracing::instrument(name = "auth.login", skip_all)]
pub async fn login(deps: &AuthDeps, body: Value) -> ApiV1Response {
    let dto = match validate_request_body::<LoginDto>(body).await {
        Ok(dto) => dto,
        Err(response) => {
            return rejected(deps.logger.as_ref(), "auth.login.rejected", response);
        },
    };
    let LoginDto { email, password } = dto.into_inner();

    match authenticate(deps, email, password).await {
        Ok((account, token)) => {
            emit(
                deps.logger.as_ref(),
                LogEvent::new(LogLevel::Info, "auth.login.succeeded", "Session issued")
                    .with_field("accountId", account.id.to_string()),
            );
            ApiV1Response::ok_message("Login Successful")
                .with_session(deps.policy.session_cookie(token))
        },
        Err(error) => failed(
            deps.logger.as_ref(),
            "auth.login.failed",
            &error,
            LOGIN_FAILED_MESSAGE,
            deps.policy.expose_internal_errors,
        ),
    }
}

async fn register(deps: &AuthDeps, account: NewAccount) -> Result<Account> {
    let digest = deps.hasher.hash(account.password.clone()).await?;
    deps.accounts.insert(account, digest).await
}

async fn authenticate(
    deps: &AuthDeps,
    email: String,
    password: SecretString,
) -> Result<(Account, SecretString)> {
    let Some(account) = deps.accounts.find_by_email(email).await? else {
        return Err(account_not_found());
    };
    let matches = deps
        .hasher
        .verify(password, account.password_hash.clone())
        .await?;
    if !matches {
        return Err(invalid_credentials());
    }
    let token = deps.sessions.issue(SessionClaims::from(&account)).await?;
    Ok((account, token))
}
