//! Common test utilities and fixtures.

use std::fmt;
use std::sync::Arc;

use linker_core::LinkerConfig;
use linker_crypto::hash_value;
use linker_model::{FederatedAttributes, User};
use linker_storage::InMemoryDirectory;
use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Salt configured on every fixture authenticator.
pub const SALT: &str = "integration-pepper";

/// Citizen ID of the fixture user Somchai.
pub const SOMCHAI_CID: &str = "1101700000001";

/// Initializes test logging once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("linker_auth=debug,linker_crypto=debug,linker_broker=debug")
        .with_test_writer()
        .try_init();
}

/// Directory fixture as a host would export it.
///
/// Somchai and Somsak share a department so narrowing rules have something
/// to narrow. Twin A and Twin B share every attribute.
pub fn directory_json() -> String {
    format!(
        r#"[
            {{
                "username": "somchai",
                "email": "somchai@example.go.th",
                "firstName": "Somchai",
                "attributes": {{
                    "cid": ["{somchai_cid}"],
                    "department": ["finance"]
                }}
            }},
            {{
                "username": "somsak",
                "email": "somsak@example.go.th",
                "firstName": "Somsak",
                "attributes": {{
                    "cid": ["{somsak_cid}"],
                    "department": ["finance"]
                }}
            }},
            {{
                "username": "twin-a",
                "email": "twin-a@example.go.th",
                "attributes": {{ "department": ["audit"], "team": ["red"] }}
            }},
            {{
                "username": "twin-b",
                "email": "twin-b@example.go.th",
                "attributes": {{ "department": ["audit"], "team": ["red"] }}
            }}
        ]"#,
        somchai_cid = hash_value(SOMCHAI_CID, SALT),
        somsak_cid = hash_value("1101700000002", SALT),
    )
}

/// Loads the fixture directory.
pub fn directory() -> anyhow::Result<InMemoryDirectory> {
    Ok(InMemoryDirectory::from_json(&directory_json())?)
}

/// Builds an authenticator config with the fixture salt.
pub fn config(rules: &str) -> LinkerConfig {
    LinkerConfig::builder().rules(rules).salt(SALT).build()
}

/// Builds IdP attributes from key/value pairs.
pub fn attributes(pairs: &[(&str, &str)]) -> FederatedAttributes {
    pairs
        .iter()
        .fold(FederatedAttributes::new(), |attrs, (key, value)| {
            attrs.with(*key, *value)
        })
}

/// Returns the username of a linked user.
pub fn username(user: Option<&User>) -> Option<&str> {
    user.map(|u| u.username.as_str())
}

/// One event recorded by [`EventCapture`].
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    /// Event level.
    pub level: Level,
    /// Recorded fields, `message` included, as `(name, value)` pairs.
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    /// Returns the value of a field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Tracing layer that records every event it sees.
#[derive(Debug, Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    /// Installs a capture as the default subscriber of the current thread.
    ///
    /// Events are recorded until the returned guard is dropped.
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let guard = tracing::subscriber::set_default(
            tracing_subscriber::registry().with(capture.clone()),
        );
        (capture, guard)
    }

    /// Returns the events recorded so far.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    /// Returns the events recorded at the given level.
    pub fn at_level(&self, level: Level) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldRecorder::default();
        event.record(&mut visitor);
        self.events.lock().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0,
        });
    }
}

#[derive(Default)]
struct FieldRecorder(Vec<(String, String)>);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}
