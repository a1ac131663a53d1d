use super::*;

#[derive(Debug)]
pub(crate) struct FrontPage {
  pub(crate) feeds: Vec<(FeedSort, Result<FeedPage, FetchError>)>,
  pub(crate) stats: Result<Stats, FetchError>,
}
