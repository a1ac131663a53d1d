use super::*;

#[derive(Clone, Debug)]
pub(crate) struct ClientConfig {
  pub(crate) base_url: Url,
  pub(crate) retry: RetryPolicy,
  pub(crate) timeout: Duration,
}

impl ClientConfig {
  pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

  pub(crate) fn from_arguments(
    arguments: &Arguments,
  ) -> Result<Self, ConfigError> {
    let base_url = ApiBase::resolve(
      arguments.context,
      arguments.api_url.as_deref(),
      arguments.public_api_url.as_deref(),
    )
    .into_url(arguments.origin.as_deref())?;

    Ok(Self {
      base_url,
      retry: RetryPolicy {
        delay: Duration::from_millis(arguments.retry_delay_ms),
        retries: arguments.retries,
      },
      timeout: Duration::from_millis(arguments.timeout_ms),
    })
  }

  pub(crate) fn new(base_url: Url) -> Self {
    Self {
      base_url,
      retry: RetryPolicy::default(),
      timeout: Self::DEFAULT_TIMEOUT,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_the_documented_policy() {
    let config = ClientConfig::new(Url::parse(ApiBase::LOCAL_DEFAULT).unwrap());

    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.retry.retries, 2);
    assert_eq!(config.retry.delay, Duration::from_millis(1200));
  }

  #[test]
  fn arguments_are_resolved_once_into_a_config() {
    let arguments = Arguments::try_parse_from([
      "clawdsea",
      "--context",
      "browser",
      "--origin",
      "https://clawdsea.example",
      "--retries",
      "0",
      "--timeout-ms",
      "2500",
    ])
    .unwrap();

    let config = ClientConfig::from_arguments(&arguments).unwrap();

    assert_eq!(config.base_url.as_str(), "https://clawdsea.example/");
    assert_eq!(config.retry.retries, 0);
    assert_eq!(config.timeout, Duration::from_millis(2500));
  }
}
