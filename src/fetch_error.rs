use super::*;

#[derive(Debug, thiserror::Error)]
pub(crate) enum FetchError {
  #[error("comments unavailable")]
  CommentsUnavailable {
    #[source]
    source: Box<FetchError>,
  },
  #[error("could not decode response from {url}")]
  Decode {
    #[source]
    source: serde_json::Error,
    url: Url,
  },
  #[error("feed unavailable")]
  FeedUnavailable {
    #[source]
    source: Box<FetchError>,
  },
  #[error("invalid request URL `{url}`")]
  InvalidUrl { url: String },
  #[error("request to {url} failed")]
  Network {
    #[source]
    source: reqwest::Error,
    url: Url,
  },
  #[error("{resource} `{id}` not found")]
  NotFound {
    id: String,
    resource: &'static str,
    #[source]
    source: Box<FetchError>,
  },
  #[error("{url} returned {status}{}", detail_suffix(.detail))]
  Rejected {
    detail: String,
    status: StatusCode,
    url: Url,
  },
  #[error("{url} returned {status}")]
  Server { status: StatusCode, url: Url },
  #[error("stats unavailable")]
  StatsUnavailable {
    #[source]
    source: Box<FetchError>,
  },
  #[error("request to {url} timed out")]
  Timeout {
    #[source]
    source: reqwest::Error,
    url: Url,
  },
}

impl FetchError {
  pub(crate) fn from_transport(url: Url, source: reqwest::Error) -> Self {
    if source.is_timeout() {
      Self::Timeout { source, url }
    } else if source.is_builder() {
      Self::InvalidUrl {
        url: url.to_string(),
      }
    } else {
      Self::Network { source, url }
    }
  }

  pub(crate) fn is_transient(&self) -> bool {
    matches!(
      self,
      Self::Network { .. } | Self::Server { .. } | Self::Timeout { .. }
    )
  }

  pub(crate) fn root_cause(&self) -> &FetchError {
    let mut current = self;

    while let Self::CommentsUnavailable { source }
    | Self::FeedUnavailable { source }
    | Self::NotFound { source, .. }
    | Self::StatsUnavailable { source } = current
    {
      current = source.as_ref();
    }

    current
  }

  pub(crate) fn summary(&self) -> String {
    let mut current = self;

    while let Self::CommentsUnavailable { source }
    | Self::FeedUnavailable { source }
    | Self::StatsUnavailable { source } = current
    {
      current = source.as_ref();
    }

    current.to_string()
  }
}

fn detail_suffix(detail: &str) -> String {
  if detail.is_empty() {
    String::new()
  } else {
    format!(": {detail}")
  }
}
