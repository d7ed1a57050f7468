//! Log output of salt resolution and rule evaluation.

use linker_auth::{AttributeMatchAuthenticator, IdentityLinker, Outcome};
use linker_core::LinkerConfig;
use linker_crypto::{hash_value, SaltResolver, SaltSource};
use tracing::Level;

use crate::common::{attributes, config, directory, EventCapture, SALT, SOMCHAI_CID};

/// Tests that every use of the fallback salt logs an error naming the variable.
#[test]
fn test_fallback_salt_logs_error_on_every_call() {
    let (capture, _guard) = EventCapture::install();
    let resolver = SaltResolver::new("LINKER_INTEGRATION_CUSTOM_SALT");

    let first = resolver.resolve_with(None, None);
    let second = resolver.resolve_with(None, Some(""));

    assert_eq!(first.source(), SaltSource::Fallback);
    assert_eq!(second.source(), SaltSource::Fallback);
    let errors = capture.at_level(Level::ERROR);
    assert_eq!(errors.len(), 2);
    for event in &errors {
        assert_eq!(
            event.field("env_var"),
            Some("LINKER_INTEGRATION_CUSTOM_SALT")
        );
    }
}

/// Tests that a configured or environment salt logs nothing at error level.
#[test]
fn test_resolved_salt_logs_no_error() {
    let (capture, _guard) = EventCapture::install();
    let resolver = SaltResolver::default();

    let _ = resolver.resolve_with(Some("ui-salt"), None);
    let _ = resolver.resolve_with(None, Some("env-salt"));

    assert!(capture.at_level(Level::ERROR).is_empty());
}

/// Tests that an ambiguous match is reported at error level.
#[tokio::test]
async fn test_ambiguous_outcome_logs_error() -> anyhow::Result<()> {
    let directory = directory()?;
    let (capture, _guard) = EventCapture::install();

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("dept:department, team:team"),
            &attributes(&[("dept", "audit"), ("team", "red")]),
            &directory,
        )
        .await;

    assert_eq!(outcome, Outcome::Ambiguous { count: 2 });
    let errors = capture.at_level(Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("count"), Some("2"));
    Ok(())
}

/// Tests that debug tracing of a hashed rule logs the hash and never the raw value.
#[tokio::test]
async fn test_hashed_rule_debug_trace_omits_raw_value() -> anyhow::Result<()> {
    let directory = directory()?;
    let config = LinkerConfig::builder()
        .rules("citizen_id:cid:true")
        .salt(SALT)
        .debug(true)
        .build();
    let (capture, _guard) = EventCapture::install();

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config,
            &attributes(&[("citizen_id", SOMCHAI_CID)]),
            &directory,
        )
        .await;

    assert!(matches!(outcome, Outcome::Linked(_)));
    let events = capture.events();
    assert!(!events.is_empty());
    assert!(events
        .iter()
        .flat_map(|e| e.fields.iter())
        .all(|(_, value)| !value.contains(SOMCHAI_CID)));

    let hashed = hash_value(SOMCHAI_CID, SALT);
    assert!(events.iter().any(|e| e.field("hash") == Some(hashed.as_str())));
    Ok(())
}

/// Tests that evaluation without debug logging emits no info events.
#[tokio::test]
async fn test_evaluation_is_quiet_without_debug() -> anyhow::Result<()> {
    let directory = directory()?;
    let (capture, _guard) = EventCapture::install();

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("citizen_id:cid:true"),
            &attributes(&[("citizen_id", SOMCHAI_CID)]),
            &directory,
        )
        .await;

    assert!(matches!(outcome, Outcome::Linked(_)));
    assert!(capture.at_level(Level::INFO).is_empty());
    Ok(())
}
