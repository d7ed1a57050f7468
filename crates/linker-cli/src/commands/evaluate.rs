//! Dry-run evaluation of a linking attempt.

use linker_auth::{AttributeMatchAuthenticator, AuthenticatorResult, IdentityLinker, Outcome};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::EvaluateArgs;
use crate::config::{load_attributes, load_directory, load_linker_config};
use crate::output::{output_single, success, warning, OutputFormat};

use super::NONE;

/// Evaluation result for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct OutcomeReport {
    /// Outcome label.
    pub outcome: String,
    /// Linked username.
    #[tabled(rename = "User")]
    pub user: String,
    /// Reason, attribute or error message.
    pub detail: String,
    /// What the host login flow would do.
    #[tabled(rename = "Flow Result")]
    pub flow_result: String,
    /// Error page the host would render.
    #[tabled(rename = "Error Page")]
    pub error_page: String,
}

impl OutcomeReport {
    /// Builds the report for an outcome.
    #[must_use]
    pub fn new(outcome: &Outcome) -> Self {
        let detail = match outcome {
            Outcome::Linked(user) => user.id.to_string(),
            Outcome::Ambiguous { count } => format!("{count} users matched"),
            Outcome::NotFound { reason } => reason.error_key().to_string(),
            Outcome::ConfigurationError(e) => e.to_string(),
            Outcome::AttributeMissing { attribute } => format!("missing IdP attribute '{attribute}'"),
            Outcome::InternalError(message) => message.clone(),
        };

        let (flow_result, error_page) = match AuthenticatorResult::from(outcome) {
            AuthenticatorResult::Success => ("success".to_string(), NONE.to_string()),
            AuthenticatorResult::Attempted => ("attempted".to_string(), NONE.to_string()),
            AuthenticatorResult::Failure { error, page } => (
                format!("failure ({error:?})"),
                page.map_or_else(
                    || NONE.to_string(),
                    |p| format!("{} ({})", p.message_key, p.status),
                ),
            ),
        };

        Self {
            outcome: outcome.label().to_string(),
            user: outcome
                .user()
                .map_or_else(|| NONE.to_string(), |u| u.username.clone()),
            detail,
            flow_result,
            error_page,
        }
    }
}

/// Runs the evaluate command.
pub async fn run_evaluate(args: EvaluateArgs, format: OutputFormat) -> crate::CliResult<()> {
    let config = load_linker_config(&args.config)?;
    let attributes = load_attributes(&args.attributes)?;
    let directory = load_directory(&args.directory)?;

    tracing::debug!(
        attributes = attributes.len(),
        users = directory.len(),
        "evaluating linking rules"
    );

    let outcome = AttributeMatchAuthenticator::default()
        .evaluate(&config, &attributes, &directory)
        .await;

    output_single(&OutcomeReport::new(&outcome), format)?;

    if matches!(format, OutputFormat::Table) {
        match &outcome {
            Outcome::Linked(user) => success(&format!("Identity links to '{}'", user.username)),
            other => warning(&format!("No link established ({})", other.label())),
        }
    }

    Ok(())
}
