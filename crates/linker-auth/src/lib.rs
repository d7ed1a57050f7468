//! # linker-auth
//!
//! Links a federated identity to exactly one local account.
//!
//! An operator configures an ordered list of matching rules such as
//! `citizen_id:cid:true, email:email`. Each rule names an attribute asserted
//! by the identity provider, the local user attribute it must equal, and
//! whether the IdP value is privacy-hashed before the comparison.
//!
//! ## Evaluation
//!
//! 1. [`rule`] parses the specification, failing fast on any bad entry.
//! 2. [`engine`] runs the rules in order. The first rule queries the
//!    directory (indexed lookup for `email`/`username`, attribute search
//!    otherwise); every later rule only narrows the candidates in memory.
//! 3. [`decision`] turns the final candidate set into an [`Outcome`].
//! 4. [`authenticator`] maps the outcome onto the host's login flow.
//!
//! ## Example
//!
//! ```ignore
//! use linker_auth::{AttributeMatchAuthenticator, IdentityLinker};
//! use linker_core::LinkerConfig;
//!
//! let config = LinkerConfig::builder()
//!     .rules("citizen_id:cid:true, email:email")
//!     .build();
//! let outcome = AttributeMatchAuthenticator::default()
//!     .evaluate(&config, &identity.attributes, &directory)
//!     .await;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod authenticator;
pub mod decision;
pub mod engine;
pub mod error;
pub mod factory;
pub mod rule;

pub use authenticator::{
    AttributeMatchAuthenticator, AuthContext, Authenticator, AuthenticatorResult, ErrorPage,
    FlowError, IdentityLinker, POST_BROKER_LOGIN_AUTHENTICATED,
};
pub use decision::{NotFoundReason, Outcome};
pub use engine::{CandidateSet, Evaluation, RuleEngine};
pub use error::{LinkError, LinkResult};
pub use factory::{AttributeMatchAuthenticatorFactory, AuthenticatorFactory, Requirement};
pub use rule::{IndexedKey, MatchRule, RuleSpecification};
