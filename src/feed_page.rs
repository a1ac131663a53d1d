use super::*;

#[derive(Debug)]
pub(crate) struct FeedPage {
  pub(crate) has_next: bool,
  pub(crate) posts: Vec<Post>,
}

impl FeedPage {
  pub(crate) fn from_overfetch(mut posts: Vec<Post>, limit: usize) -> Self {
    let has_next = posts.len() > limit;

    posts.truncate(limit);

    Self { has_next, posts }
  }
}
