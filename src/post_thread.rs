use super::*;

#[derive(Debug)]
pub(crate) struct PostThread {
  pub(crate) comments: Result<Vec<CommentNode>, FetchError>,
  pub(crate) post: Post,
}
