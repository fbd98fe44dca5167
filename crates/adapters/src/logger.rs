//! Structured JSON logger adapter.
//!
//! One event becomes one JSON line:
//! `{"timestampMs":..,"level":"info","event":"product.create.succeeded","message":..,"fields":{..}}`.
//! Fields whose key looks like a secret (`password`, `accessToken`, ...) are
//! replaced with `[REDACTED]` at any depth, in both `fields` and `error`.

use crate::log_sink::LogSink;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use storefront_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use storefront_shared::{REDACTED, is_secret_key};

const SERIALIZE_FAILED_LINE: &str = "{\"timestampMs\":0,\"level\":\"error\",\"event\":\"logger.serialize_failed\",\"message\":\"log serialization failed\"}\n";

/// JSON logger emitting one line per event.
#[derive(Clone)]
pub struct JsonLogger {
    sink: Arc<dyn LogSink>,
    base_fields: LogFields,
    min_level: LogLevel,
}

impl JsonLogger {
    /// Logger at `info` with no base fields.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            base_fields: LogFields::new(),
            min_level: LogLevel::Info,
        }
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Set the minimum level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the minimum level from a config name; unknown names keep `info`.
    #[must_use]
    pub fn with_min_level_name(self, level: &str) -> Self {
        let level = LogLevel::parse(level).unwrap_or(LogLevel::Info);
        self.with_min_level(level)
    }

    fn render(&self, event: LogEvent) -> String {
        let mut fields = self.base_fields.clone();
        if let Some(extra) = event.fields {
            fields.extend(extra);
        }

        let mut payload = Map::new();
        payload.insert("timestampMs".to_owned(), Value::from(now_epoch_ms()));
        payload.insert("level".to_owned(), Value::from(event.level.as_str()));
        payload.insert("event".to_owned(), Value::from(event.event.into_string()));
        payload.insert(
            "message".to_owned(),
            Value::from(event.message.into_string()),
        );
        if !fields.is_empty() {
            let mut object: Map<String, Value> = fields
                .into_iter()
                .map(|(key, value)| (key.into_string(), value))
                .collect();
            redact_object(&mut object);
            payload.insert("fields".to_owned(), Value::Object(object));
        }
        if let Some(mut error) = event.error {
            redact_value(&mut error);
            payload.insert("error".to_owned(), error);
        }

        serde_json::to_string(&Value::Object(payload)).map_or_else(
            |_| SERIALIZE_FAILED_LINE.to_owned(),
            |mut line| {
                line.push('\n');
                line
            },
        )
    }
}

impl LoggerPort for JsonLogger {
    fn log(&self, event: LogEvent) {
        if event.level < self.min_level {
            return;
        }
        let line = self.render(event);
        self.sink.write_line(&line);
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merged.extend(fields);
        Box::new(Self {
            sink: Arc::clone(&self.sink),
            base_fields: merged,
            min_level: self.min_level,
        })
    }
}

fn redact_object(map: &mut Map<String, Value>) {
    for (key, value) in map.iter_mut() {
        if is_secret_key(key) {
            *value = Value::from(REDACTED);
        } else {
            redact_value(value);
        }
    }
}

fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => redact_object(map),
        Value::Array(items) => items.iter_mut().for_each(redact_value),
        _ => {},
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_sink::MemoryLogSink;
    use serde_json::json;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn credentials_never_reach_the_sink() -> TestResult {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone());

        logger.log(
            LogEvent::new(LogLevel::Warn, "auth.signup.rejected", "signup rejected")
                .with_field("email", "ada@example.com")
                .with_field("password", "hunter22")
                .with_error(json!({
                    "code": "auth:email_exists",
                    "metadata": { "accessToken": "eyJ", "attempts": [{ "secret": "x" }] }
                })),
        );

        let lines = sink.json_lines()?;
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line["level"], "warn");
        assert_eq!(line["event"], "auth.signup.rejected");
        assert_eq!(line["fields"]["email"], "ada@example.com");
        assert_eq!(line["fields"]["password"], REDACTED);
        assert_eq!(line["error"]["code"], "auth:email_exists");
        assert_eq!(line["error"]["metadata"]["accessToken"], REDACTED);
        assert_eq!(line["error"]["metadata"]["attempts"][0]["secret"], REDACTED);
        Ok(())
    }

    #[test]
    fn events_below_min_level_are_dropped() {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone()).with_min_level_name("WARN");

        logger.info("product.list.succeeded", "listed", None);
        logger.error("product.list.failed", "store offline", None);

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("product.list.failed"));
        assert!(lines[0].ends_with('\n'));
    }

    #[test]
    fn child_fields_layer_over_base_fields() -> TestResult {
        let sink = Arc::new(MemoryLogSink::default());
        let mut base = LogFields::new();
        base.insert("service".into(), json!("storefront"));
        base.insert("handler".into(), json!("root"));
        let logger = JsonLogger::new(sink.clone()).with_base_fields(base);

        let mut scoped = LogFields::new();
        scoped.insert("handler".into(), json!("product.update"));
        let child = logger.child(scoped);
        child.info("product.update.succeeded", "updated", None);

        let lines = sink.json_lines()?;
        assert_eq!(lines[0]["fields"]["service"], "storefront");
        assert_eq!(lines[0]["fields"]["handler"], "product.update");
        Ok(())
    }

    #[test]
    fn unknown_level_names_fall_back_to_info() {
        let sink = Arc::new(MemoryLogSink::default());
        let logger = JsonLogger::new(sink.clone()).with_min_level_name("chatty");
        logger.debug("config.loaded", "hidden", None);
        logger.info("config.loaded", "shown", None);
        assert_eq!(sink.take().len(), 1);
    }
}
