#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FeedSort {
  Hot,
  Latest,
}

impl FeedSort {
  pub(crate) fn all() -> &'static [FeedSort] {
    &[FeedSort::Hot, FeedSort::Latest]
  }

  pub(crate) fn as_str(self) -> &'static str {
    match self {
      FeedSort::Hot => "hot",
      FeedSort::Latest => "latest",
    }
  }
}
