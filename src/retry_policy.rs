use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
  pub(crate) delay: Duration,
  pub(crate) retries: u32,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      delay: Duration::from_millis(1200),
      retries: 2,
    }
  }
}

impl RetryPolicy {
  pub(crate) async fn run<T, F, Fut>(
    &self,
    mut attempt: F,
  ) -> Result<T, FetchError>
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
  {
    let mut remaining = self.retries;

    loop {
      match attempt().await {
        Err(error) if error.is_transient() && remaining > 0 => {
          remaining -= 1;

          warn!(%error, remaining, "retrying request");

          tokio::time::sleep(self.delay).await;
        }
        result => return result,
      }
    }
  }
}
