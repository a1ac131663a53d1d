use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
  FetchAgent {
    agent_id: String,
    request_id: u64,
  },
  FetchFeed {
    query: FeedQuery,
    request_id: u64,
    tab_index: usize,
  },
  FetchThread {
    post_id: String,
    request_id: u64,
  },
}
