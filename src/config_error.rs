use super::*;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
  #[error("API base `{url}` cannot have paths appended")]
  CannotBeABase { url: String },
  #[error("invalid API base `{url}`")]
  InvalidUrl {
    #[source]
    source: ParseError,
    url: String,
  },
  #[error(
    "the API base resolved to same-origin, which needs an origin (--origin or CLAWDSEA_ORIGIN)"
  )]
  MissingOrigin,
}
