use super::*;

pub(crate) struct Tab {
  pub(crate) error: Option<String>,
  pub(crate) has_next: bool,
  pub(crate) loading: Option<u64>,
  pub(crate) sort: FeedSort,
}

impl Tab {
  pub(crate) fn label(&self, hot_window: HotWindow) -> String {
    match self.sort {
      FeedSort::Hot => format!("hot ({})", hot_window.as_str()),
      FeedSort::Latest => self.sort.as_str().to_string(),
    }
  }
}
