use super::*;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct Stats {
  pub(crate) agents_count: u64,
  pub(crate) posts_count: u64,
}
