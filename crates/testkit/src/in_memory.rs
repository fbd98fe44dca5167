//! In-memory adapter implementations for port contracts.
//!
//! These implementations are intended for:
//! - Handler integration tests
//! - Deterministic contract tests for the ports layer
//! - Local experimentation without a document store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use storefront_domain::{AccountId, EpochMillis, email_already_exists};
use storefront_ports::{
    Account, AccountStorePort, BoxFuture, LogEvent, LogFields, LoggerPort, NewAccount,
    NewProduct, PasswordHasherPort, Product, ProductId, ProductPatch, ProductStorePort,
    SessionClaims, SessionIssuerPort,
};
use storefront_shared::{ErrorEnvelope, Result, SecretString};
use tokio::sync::RwLock;

/// A no-op logger implementation.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn log(&self, _event: LogEvent) {}

    fn child(&self, _fields: LogFields) -> Box<dyn LoggerPort> {
        Box::new(Self)
    }
}

/// Logger that keeps every event for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    base: LogFields,
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl RecordingLogger {
    /// Snapshot of the events logged so far, base fields merged in.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Names of the events logged so far.
    pub fn event_names(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|event| event.event.into_string())
            .collect()
    }
}

impl LoggerPort for RecordingLogger {
    fn log(&self, mut event: LogEvent) {
        if !self.base.is_empty() {
            let fields = event.fields.get_or_insert_with(LogFields::new);
            for (key, value) in &self.base {
                fields.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut base = self.base.clone();
        base.extend(fields);
        Box::new(Self {
            base,
            events: Arc::clone(&self.events),
        })
    }
}

/// Deterministic clock: every reading is one millisecond after the last.
#[derive(Debug)]
pub struct TickClock {
    next: AtomicU64,
}

impl TickClock {
    /// Clock whose first reading is `start`.
    pub const fn starting_at(start: EpochMillis) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Current reading; advances the clock.
    pub fn now(&self) -> EpochMillis {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::starting_at(1_700_000_000_000)
    }
}

/// One-shot failure slot shared by the in-memory stores.
#[derive(Debug, Default)]
struct FailureSlot(RwLock<Option<ErrorEnvelope>>);

impl FailureSlot {
    async fn arm(&self, error: ErrorEnvelope) {
        *self.0.write().await = Some(error);
    }

    async fn check(&self) -> Result<()> {
        self.0.write().await.take().map_or(Ok(()), Err)
    }
}

/// In-memory product collection.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
    clock: TickClock,
    failure: FailureSlot,
}

impl InMemoryProductStore {
    /// Empty store with the default clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store call fail with `error`.
    pub async fn fail_next(&self, error: ErrorEnvelope) {
        self.failure.arm(error).await;
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    /// Stored product by id.
    pub async fn get(&self, id: ProductId) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }
}

impl ProductStorePort for InMemoryProductStore {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Product>>> {
        Box::pin(async move {
            self.failure.check().await?;
            let mut products: Vec<Product> =
                self.products.read().await.iter().rev().cloned().collect();
            products.sort_by(|left, right| right.created_at.cmp(&left.created_at));
            Ok(products)
        })
    }

    fn insert(&self, product: NewProduct) -> BoxFuture<'_, Result<Product>> {
        Box::pin(async move {
            self.failure.check().await?;
            let record = Product::create(ProductId::generate(), product, self.clock.now());
            self.products.write().await.push(record.clone());
            Ok(record)
        })
    }

    fn update(&self, id: ProductId, patch: ProductPatch) -> BoxFuture<'_, Result<Option<Product>>> {
        Box::pin(async move {
            self.failure.check().await?;
            let mut products = self.products.write().await;
            let Some(product) = products.iter_mut().find(|product| product.id == id) else {
                return Ok(None);
            };
            product.apply(patch, self.clock.now());
            Ok(Some(product.clone()))
        })
    }

    fn delete(&self, id: ProductId) -> BoxFuture<'_, Result<Option<Product>>> {
        Box::pin(async move {
            self.failure.check().await?;
            let mut products = self.products.write().await;
            let position = products.iter().position(|product| product.id == id);
            Ok(position.map(|index| products.remove(index)))
        })
    }
}

/// In-memory account collection keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<BTreeMap<String, Account>>,
    clock: TickClock,
    failure: FailureSlot,
}

impl InMemoryAccountStore {
    /// Empty store with the default clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store call fail with `error`.
    pub async fn fail_next(&self, error: ErrorEnvelope) {
        self.failure.arm(error).await;
    }

    /// Number of registered accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// True when no account is registered.
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl AccountStorePort for InMemoryAccountStore {
    fn insert(
        &self,
        account: NewAccount,
        password_hash: SecretString,
    ) -> BoxFuture<'_, Result<Account>> {
        Box::pin(async move {
            self.failure.check().await?;
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&account.email) {
                return Err(email_already_exists());
            }
            let now = self.clock.now();
            let record = Account {
                id: AccountId::generate(),
                name: account.name,
                email: account.email,
                password_hash,
                created_at: now,
                updated_at: now,
            };
            accounts.insert(record.email.clone(), record.clone());
            Ok(record)
        })
    }

    fn find_by_email(&self, email: String) -> BoxFuture<'_, Result<Option<Account>>> {
        Box::pin(async move {
            self.failure.check().await?;
            Ok(self.accounts.read().await.get(&email).cloned())
        })
    }
}

/// Reversible stand-in for a password hasher.
#[derive(Debug, Default)]
pub struct FakePasswordHasher;

const FAKE_DIGEST_PREFIX: &str = "fake-digest:";

impl PasswordHasherPort for FakePasswordHasher {
    fn hash(&self, password: SecretString) -> BoxFuture<'_, Result<SecretString>> {
        Box::pin(async move {
            Ok(SecretString::from(format!(
                "{FAKE_DIGEST_PREFIX}{}",
                password.expose()
            )))
        })
    }

    fn verify(&self, password: SecretString, digest: SecretString) -> BoxFuture<'_, Result<bool>> {
        Box::pin(async move {
            Ok(digest
                .expose()
                .strip_prefix(FAKE_DIGEST_PREFIX)
                .is_some_and(|plain| plain == password.expose()))
        })
    }
}

/// Session issuer producing predictable tokens and remembering claims.
#[derive(Debug, Default)]
pub struct FakeSessionIssuer {
    issued: Mutex<Vec<SessionClaims>>,
}

impl FakeSessionIssuer {
    /// Claims issued so far.
    pub fn issued(&self) -> Vec<SessionClaims> {
        self.issued
            .lock()
            .map(|issued| issued.clone())
            .unwrap_or_default()
    }
}

impl SessionIssuerPort for FakeSessionIssuer {
    fn issue(&self, claims: SessionClaims) -> BoxFuture<'_, Result<SecretString>> {
        Box::pin(async move {
            let token = SecretString::from(format!("session.{}", claims.id));
            if let Ok(mut issued) = self.issued.lock() {
                issued.push(claims);
            }
            Ok(token)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_ports::LogLevel;

    fn new_product(title: &str) -> NewProduct {
        NewProduct {
            title: title.to_owned(),
            price: 10.0,
            discount: 0.0,
        }
    }

    #[tokio::test]
    async fn products_list_newest_first() -> Result<()> {
        let store = InMemoryProductStore::new();
        store.insert(new_product("first")).await?;
        store.insert(new_product("second")).await?;
        let titles: Vec<String> = store
            .list()
            .await?
            .into_iter()
            .map(|product| product.title)
            .collect();
        assert_eq!(titles, ["second", "first"]);
        Ok(())
    }

    #[tokio::test]
    async fn armed_failure_fires_once() -> Result<()> {
        let store = InMemoryProductStore::new();
        store
            .fail_next(ErrorEnvelope::expected(
                storefront_shared::ErrorCode::io(),
                "offline",
            ))
            .await;
        assert!(store.list().await.is_err());
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn fake_hasher_verifies_only_the_original() -> Result<()> {
        let hasher = FakePasswordHasher;
        let digest = hasher.hash(SecretString::new("hunter22")).await?;
        assert!(
            hasher
                .verify(SecretString::new("hunter22"), digest.clone())
                .await?
        );
        assert!(!hasher.verify(SecretString::new("hunter23"), digest).await?);
        Ok(())
    }

    #[test]
    fn recording_logger_children_share_events() {
        let logger = RecordingLogger::default();
        let mut fields = LogFields::new();
        fields.insert("handler".into(), "signup".into());
        let child = logger.child(fields);
        child.log(LogEvent::new(LogLevel::Info, "auth.signup.succeeded", "ok"));
        let events = logger.events();
        assert_eq!(events.len(), 1);
        let handler = events[0]
            .fields
            .as_ref()
            .and_then(|fields| fields.get("handler"))
            .cloned();
        assert_eq!(handler, Some(serde_json::json!("signup")));
    }

    #[test]
    fn tick_clock_advances() {
        let clock = TickClock::starting_at(5);
        assert_eq!(clock.now(), 5);
        assert_eq!(clock.now(), 6);
    }
}
