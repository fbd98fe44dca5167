//! API v1 DTO types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use storefront_domain::{
    CreateAuthDto, CreateProductDto, EpochMillis, LoginDto, Product, UpdateAuthDto,
    UpdateProductDto,
};
use storefront_shared::SecretString;

/// Body of `POST /api/auth/signup`.
pub type ApiV1SignupRequestDto = CreateAuthDto;
/// Body of an account update.
pub type ApiV1UpdateAccountRequestDto = UpdateAuthDto;
/// Body of `POST /api/auth/login`.
pub type ApiV1LoginRequestDto = LoginDto;
/// Body of `POST /api/product`.
pub type ApiV1CreateProductRequestDto = CreateProductDto;
/// Body of `PUT /api/product/:id`.
pub type ApiV1UpdateProductRequestDto = UpdateProductDto;

/// HTTP status codes produced by the v1 handlers.
pub mod status {
    /// Success.
    pub const OK: u16 = 200;
    /// Request body failed validation.
    pub const BAD_REQUEST: u16 = 400;
    /// Credentials did not match.
    pub const UNAUTHORIZED: u16 = 401;
    /// Referenced record does not exist.
    pub const NOT_FOUND: u16 = 404;
    /// Unique key already taken.
    pub const CONFLICT: u16 = 409;
    /// Anything else.
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Error kind exposed in API v1 error payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiV1ErrorKind {
    /// Expected, user-facing errors.
    Expected,
    /// Invariant violations that indicate a bug.
    Invariant,
}

/// API v1 error code string (stable contract value).
pub type ApiV1ErrorCode = String;

/// Metadata map attached to API v1 errors.
pub type ApiV1ErrorMeta = BTreeMap<String, String>;

/// Detailed error payload, used by tooling output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1ErrorDto {
    /// Stable error code (e.g. `ERR_PRODUCT_NOT_FOUND`).
    pub code: ApiV1ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Error category.
    pub kind: ApiV1ErrorKind,
    /// Optional metadata, with secrets redacted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ApiV1ErrorMeta>,
}

/// `{"message": ...}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiV1MessageDto {
    /// Message shown to the caller.
    pub message: String,
}

impl ApiV1MessageDto {
    /// Body carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of a 400 validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiV1ValidationFailedDto {
    /// Always `Validation failed`.
    pub message: String,
    /// `field: message` entries in outcome order.
    pub errors: Vec<String>,
}

/// Product as returned by `GET /api/product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1ProductDto {
    /// Record identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Normalized title.
    pub title: String,
    /// Price.
    pub price: f64,
    /// Discount percentage.
    pub discount: f64,
    /// Creation time, epoch milliseconds.
    pub created_at: EpochMillis,
    /// Last modification time, epoch milliseconds.
    pub updated_at: EpochMillis,
}

impl From<&Product> for ApiV1ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.price,
            discount: product.discount,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Response body variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiV1Body {
    /// `{"message": ...}`.
    Message(ApiV1MessageDto),
    /// `{"message": "Validation failed", "errors": [...]}`.
    ValidationFailed(ApiV1ValidationFailedDto),
    /// Product listing.
    Products(Vec<ApiV1ProductDto>),
}

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApiV1SameSite {
    /// `SameSite=Lax`.
    Lax,
    /// `SameSite=None`.
    None,
}

impl ApiV1SameSite {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// Session cookie to set on the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiV1SessionCookie {
    /// Cookie name.
    pub name: String,
    /// Session token; serialized redacted.
    pub token: SecretString,
    /// Lifetime in milliseconds.
    pub max_age_ms: u64,
    /// `SameSite` attribute.
    pub same_site: ApiV1SameSite,
    /// `HttpOnly` attribute.
    pub http_only: bool,
    /// `Secure` attribute.
    pub secure: bool,
}

impl ApiV1SessionCookie {
    /// Render the `Set-Cookie` header value, token included.
    #[must_use]
    pub fn set_cookie_header(&self) -> String {
        let mut header = format!(
            "{}={}; Max-Age={}; Path=/; SameSite={}",
            self.name,
            self.token.expose(),
            self.max_age_ms / 1_000,
            self.same_site.as_str(),
        );
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

/// HTTP-style response produced by every v1 handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiV1Response {
    /// HTTP status code.
    pub status: u16,
    /// JSON body.
    pub body: ApiV1Body,
    /// Session cookie to set, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<ApiV1SessionCookie>,
}

impl ApiV1Response {
    /// `200 {"message": ...}`.
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self::message(status::OK, message)
    }

    /// `<status> {"message": ...}`.
    pub fn message(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiV1Body::Message(ApiV1MessageDto::new(message)),
            session: None,
        }
    }

    /// `200 [product, ...]`.
    #[must_use]
    pub fn products(products: &[Product]) -> Self {
        Self {
            status: status::OK,
            body: ApiV1Body::Products(products.iter().map(ApiV1ProductDto::from).collect()),
            session: None,
        }
    }

    /// Attach a session cookie.
    #[must_use]
    pub fn with_session(mut self, cookie: ApiV1SessionCookie) -> Self {
        self.session = Some(cookie);
        self
    }

    /// Message carried by the body, if it has one.
    #[must_use]
    pub fn body_message(&self) -> Option<&str> {
        match &self.body {
            ApiV1Body::Message(dto) => Some(&dto.message),
            ApiV1Body::ValidationFailed(dto) => Some(&dto.message),
            ApiV1Body::Products(_) => None,
        }
    }

    /// Body as a JSON value.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.body)
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl fmt::Display for ApiV1Response {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.body_message() {
            Some(message) => write!(formatter, "{} {message}", self.status),
            None => write!(formatter, "{}", self.status),
        }
    }
}
