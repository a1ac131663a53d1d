use super::*;

#[derive(Debug, PartialEq)]
pub(crate) struct CommentNode {
  pub(crate) comment: Comment,
  pub(crate) replies: Vec<CommentNode>,
}

impl CommentNode {
  pub(crate) fn new(comment: Comment) -> Self {
    Self {
      comment,
      replies: Vec::new(),
    }
  }

  pub(crate) fn size(&self) -> usize {
    let mut count = 0;
    let mut stack = vec![self];

    while let Some(node) = stack.pop() {
      count += 1;
      stack.extend(node.replies.iter());
    }

    count
  }
}

// Reply chains can be arbitrarily deep, so dropping must not recurse.
impl Drop for CommentNode {
  fn drop(&mut self) {
    let mut pending = std::mem::take(&mut self.replies);

    while let Some(mut node) = pending.pop() {
      pending.append(&mut node.replies);
    }
  }
}
