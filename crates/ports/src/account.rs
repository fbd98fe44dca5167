//! Account storage and credential boundary contracts.

use crate::BoxFuture;
use storefront_domain::{Account, NewAccount, SessionClaims};
use storefront_shared::{Result, SecretString};

/// Boundary contract for the account collection.
pub trait AccountStorePort: Send + Sync {
    /// Persist a new account with an already-hashed password.
    ///
    /// Fails with the `auth:email_exists` code when the email is registered.
    fn insert(
        &self,
        account: NewAccount,
        password_hash: SecretString,
    ) -> BoxFuture<'_, Result<Account>>;

    /// Look up an account by its login email.
    fn find_by_email(&self, email: String) -> BoxFuture<'_, Result<Option<Account>>>;
}

/// Boundary contract for password hashing.
pub trait PasswordHasherPort: Send + Sync {
    /// Produce a digest of `password`.
    fn hash(&self, password: SecretString) -> BoxFuture<'_, Result<SecretString>>;

    /// Return true when `password` matches `digest`.
    fn verify(&self, password: SecretString, digest: SecretString) -> BoxFuture<'_, Result<bool>>;
}

/// Boundary contract for issuing session tokens.
pub trait SessionIssuerPort: Send + Sync {
    /// Sign `claims` into an opaque bearer token.
    fn issue(&self, claims: SessionClaims) -> BoxFuture<'_, Result<SecretString>>;
}
