use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiBase {
  Explicit(String),
  SameOrigin,
}

impl ApiBase {
  pub(crate) const LOCAL_DEFAULT: &str = "http://localhost:8000";

  pub(crate) fn into_url(
    self,
    origin: Option<&str>,
  ) -> Result<Url, ConfigError> {
    let raw = match self {
      ApiBase::Explicit(base) => base,
      ApiBase::SameOrigin => origin
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .ok_or(ConfigError::MissingOrigin)?
        .to_string(),
    };

    let url = Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
      source,
      url: raw.clone(),
    })?;

    if url.cannot_be_a_base() {
      return Err(ConfigError::CannotBeABase { url: raw });
    }

    Ok(url)
  }

  /// Blank values count as unset.
  pub(crate) fn resolve(
    context: ExecutionContext,
    server_override: Option<&str>,
    public_base: Option<&str>,
  ) -> Self {
    let present = |value: Option<&str>| {
      value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
    };

    match context {
      ExecutionContext::Server => ApiBase::Explicit(
        present(server_override)
          .or_else(|| present(public_base))
          .unwrap_or_else(|| Self::LOCAL_DEFAULT.to_string()),
      ),
      ExecutionContext::Browser => {
        present(public_base).map_or(ApiBase::SameOrigin, ApiBase::Explicit)
      }
    }
  }
}
