use super::*;

pub(crate) enum Event {
  Agent {
    request_id: u64,
    result: Result<AgentProfile, FetchError>,
  },
  Feed {
    offset: usize,
    request_id: u64,
    result: Result<FeedPage, FetchError>,
    tab_index: usize,
  },
  Thread {
    request_id: u64,
    result: Result<PostThread, FetchError>,
  },
}
