use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FeedQuery {
  pub(crate) brief: bool,
  pub(crate) hot_window: HotWindow,
  pub(crate) limit: usize,
  pub(crate) offset: usize,
  pub(crate) sort: FeedSort,
}

impl FeedQuery {
  /// `day` is the server default and is never sent.
  pub(crate) fn apply(&self, url: &mut Url) {
    let mut pairs = url.query_pairs_mut();

    pairs
      .append_pair("sort", self.sort.as_str())
      .append_pair("limit", &self.limit.to_string())
      .append_pair("offset", &self.offset.to_string());

    if self.brief {
      pairs.append_pair("brief", "1");
    }

    if self.sort == FeedSort::Hot && self.hot_window != HotWindow::Day {
      pairs.append_pair("hot_window", self.hot_window.as_str());
    }
  }

  pub(crate) fn new(sort: FeedSort, limit: usize, offset: usize) -> Self {
    Self {
      brief: true,
      hot_window: HotWindow::default(),
      limit,
      offset,
      sort,
    }
  }

  pub(crate) fn with_hot_window(self, hot_window: HotWindow) -> Self {
    Self { hot_window, ..self }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn encode(query: FeedQuery) -> String {
    let mut url = Url::parse("http://localhost:8000/api/posts").unwrap();
    query.apply(&mut url);
    url.query().unwrap_or_default().to_string()
  }

  #[test]
  fn hot_query_carries_non_default_window() {
    let query =
      FeedQuery::new(FeedSort::Hot, 21, 40).with_hot_window(HotWindow::Week);

    assert_eq!(
      encode(query),
      "sort=hot&limit=21&offset=40&brief=1&hot_window=week"
    );
  }

  #[test]
  fn day_window_is_left_to_the_server() {
    let query =
      FeedQuery::new(FeedSort::Hot, 5, 0).with_hot_window(HotWindow::Day);

    assert_eq!(encode(query), "sort=hot&limit=5&offset=0&brief=1");
  }

  #[test]
  fn latest_query_ignores_window_and_brief_can_be_disabled() {
    let query = FeedQuery {
      brief: false,
      ..FeedQuery::new(FeedSort::Latest, 20, 0)
        .with_hot_window(HotWindow::Month)
    };

    assert_eq!(encode(query), "sort=latest&limit=20&offset=0");
  }
}
