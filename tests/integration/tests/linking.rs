//! Rule evaluation against a populated directory.

use linker_auth::{AttributeMatchAuthenticator, IdentityLinker, NotFoundReason, Outcome};
use linker_core::{ConfigError, LinkerConfig};
use linker_integration_tests::CountingDirectory;
use linker_model::FederatedAttributes;

use crate::common::{attributes, config, directory, init_tracing, username, SOMCHAI_CID};

/// Tests that a single hashed rule links through attribute search.
#[tokio::test]
async fn test_hashed_rule_links_single_user() -> anyhow::Result<()> {
    init_tracing();
    let directory = CountingDirectory::new(directory()?);

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("citizen_id:cid:true"),
            &attributes(&[("citizen_id", SOMCHAI_CID)]),
            &directory,
        )
        .await;

    assert_eq!(username(outcome.user()), Some("somchai"));
    assert_eq!(directory.attribute_searches(), 1);
    assert_eq!(directory.email_lookups(), 0);
    Ok(())
}

/// Tests that an unhashed rule never matches hashed directory values.
#[tokio::test]
async fn test_unhashed_rule_compares_raw_value() -> anyhow::Result<()> {
    let directory = directory()?;

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("citizen_id:cid"),
            &attributes(&[("citizen_id", SOMCHAI_CID)]),
            &directory,
        )
        .await;

    assert_eq!(
        outcome,
        Outcome::NotFound {
            reason: NotFoundReason::NoUserFound
        }
    );
    Ok(())
}

/// Tests that `email:email` uses the raw email and the email index.
#[tokio::test]
async fn test_email_rule_uses_email_lookup() -> anyhow::Result<()> {
    let directory = CountingDirectory::new(directory()?);

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("mail:EMAIL"),
            &attributes(&[("mail", "somsak@example.go.th")]),
            &directory,
        )
        .await;

    assert_eq!(username(outcome.user()), Some("somsak"));
    assert_eq!(directory.email_lookups(), 1);
    assert_eq!(directory.attribute_searches(), 0);
    Ok(())
}

/// Tests that `username` routes to the username index.
#[tokio::test]
async fn test_username_rule_uses_username_lookup() -> anyhow::Result<()> {
    let directory = CountingDirectory::new(directory()?);

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("preferred_username:username"),
            &attributes(&[("preferred_username", "twin-a")]),
            &directory,
        )
        .await;

    assert_eq!(username(outcome.user()), Some("twin-a"));
    assert_eq!(directory.username_lookups(), 1);
    Ok(())
}

/// Tests that a first rule matching nobody stops the evaluation.
#[tokio::test]
async fn test_first_rule_without_match_short_circuits() -> anyhow::Result<()> {
    let directory = CountingDirectory::new(directory()?);

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("dept:department, citizen_id:cid:true"),
            &attributes(&[("dept", "legal"), ("citizen_id", SOMCHAI_CID)]),
            &directory,
        )
        .await;

    assert_eq!(
        outcome,
        Outcome::NotFound {
            reason: NotFoundReason::NoUserFound
        }
    );
    assert_eq!(directory.total_calls(), 1);
    Ok(())
}

/// Tests that a later rule narrows several candidates down to one.
#[tokio::test]
async fn test_second_rule_narrows_to_single_user() -> anyhow::Result<()> {
    let directory = CountingDirectory::new(directory()?);

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("dept:department\ncitizen_id:cid:true"),
            &attributes(&[("dept", "finance"), ("citizen_id", SOMCHAI_CID)]),
            &directory,
        )
        .await;

    assert_eq!(username(outcome.user()), Some("somchai"));
    // Narrowing happens in memory.
    assert_eq!(directory.total_calls(), 1);
    Ok(())
}

/// Tests that narrowing everybody away reports a data mismatch.
#[tokio::test]
async fn test_narrowing_to_nobody_is_data_mismatch() -> anyhow::Result<()> {
    let directory = directory()?;

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("dept:department, citizen_id:cid:true"),
            &attributes(&[("dept", "finance"), ("citizen_id", "9999999999999")]),
            &directory,
        )
        .await;

    assert_eq!(
        outcome,
        Outcome::NotFound {
            reason: NotFoundReason::DataMismatch
        }
    );
    Ok(())
}

/// Tests that duplicated directory data is reported, never guessed.
#[tokio::test]
async fn test_indistinguishable_users_are_ambiguous() -> anyhow::Result<()> {
    let directory = directory()?;

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("dept:department, team:team"),
            &attributes(&[("dept", "audit"), ("team", "red")]),
            &directory,
        )
        .await;

    assert_eq!(outcome, Outcome::Ambiguous { count: 2 });
    Ok(())
}

/// Tests that narrowing compares values case-sensitively even for email.
#[tokio::test]
async fn test_narrowing_is_case_sensitive() -> anyhow::Result<()> {
    let directory = directory()?;

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("dept:department, mail:email"),
            &attributes(&[("dept", "finance"), ("mail", "SOMCHAI@example.go.th")]),
            &directory,
        )
        .await;

    assert_eq!(
        outcome,
        Outcome::NotFound {
            reason: NotFoundReason::DataMismatch
        }
    );
    Ok(())
}

/// Tests that one malformed entry rejects the whole specification.
#[tokio::test]
async fn test_malformed_entry_is_configuration_error() -> anyhow::Result<()> {
    let directory = CountingDirectory::new(directory()?);

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("mail:email, onlyonefield"),
            &attributes(&[("mail", "somchai@example.go.th")]),
            &directory,
        )
        .await;

    assert_eq!(
        outcome,
        Outcome::ConfigurationError(ConfigError::malformed_rule("onlyonefield"))
    );
    assert_eq!(directory.total_calls(), 0);
    Ok(())
}

/// Tests that an unconfigured authenticator is a configuration error.
#[tokio::test]
async fn test_missing_rules_is_configuration_error() -> anyhow::Result<()> {
    let directory = directory()?;

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(&LinkerConfig::default(), &FederatedAttributes::new(), &directory)
        .await;

    assert!(matches!(
        outcome,
        Outcome::ConfigurationError(ConfigError::Missing(_))
    ));
    Ok(())
}

/// Tests that blank specifications never reach the directory.
#[tokio::test]
async fn test_blank_specification_never_links() -> anyhow::Result<()> {
    let directory = CountingDirectory::new(directory()?);

    for rules in ["", "  ", " , \n ,"] {
        let outcome = AttributeMatchAuthenticator::default()
            .evaluate(
                &config(rules),
                &attributes(&[("mail", "somchai@example.go.th")]),
                &directory,
            )
            .await;
        assert!(!outcome.is_linked(), "rules {rules:?} linked a user");
        assert_eq!(outcome.label(), "not_found");
    }

    assert_eq!(directory.total_calls(), 0);
    Ok(())
}

/// Tests that a missing IdP attribute is inconclusive.
#[tokio::test]
async fn test_missing_idp_attribute_is_inconclusive() -> anyhow::Result<()> {
    let directory = CountingDirectory::new(directory()?);

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(
            &config("citizen_id:cid:true"),
            &attributes(&[("mail", "somchai@example.go.th")]),
            &directory,
        )
        .await;

    assert_eq!(
        outcome,
        Outcome::AttributeMissing {
            attribute: "citizen_id".to_string()
        }
    );
    assert_eq!(directory.total_calls(), 0);
    Ok(())
}

/// Tests that only the first value of a multi-valued IdP attribute counts.
#[tokio::test]
async fn test_only_first_idp_value_is_used() -> anyhow::Result<()> {
    let directory = directory()?;
    let mut attrs = FederatedAttributes::new();
    attrs.set(
        "mail",
        vec![
            "nobody@example.go.th".to_string(),
            "somchai@example.go.th".to_string(),
        ],
    );

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(&config("mail:email"), &attrs, &directory)
        .await;

    assert!(!outcome.is_linked());
    Ok(())
}
