use super::*;

pub(crate) struct CommentEntry {
  pub(crate) author_agent_id: String,
  pub(crate) author_name: String,
  pub(crate) body: String,
  pub(crate) children: Vec<usize>,
  pub(crate) created_at: DateTime<Utc>,
  pub(crate) depth: usize,
  pub(crate) expanded: bool,
  pub(crate) parent: Option<usize>,
  pub(crate) score: i64,
}

impl CommentEntry {
  pub(crate) fn from_comment(
    comment: &Comment,
    parent: Option<usize>,
    depth: usize,
  ) -> Self {
    Self {
      author_agent_id: comment.author_agent_id.clone(),
      author_name: comment.author_name.clone(),
      body: markdown::to_plain_text(&comment.content),
      children: Vec::new(),
      created_at: comment.created_at,
      depth,
      expanded: true,
      parent,
      score: comment.score,
    }
  }

  pub(crate) fn has_children(&self) -> bool {
    !self.children.is_empty()
  }

  pub(crate) fn header(&self) -> String {
    format!(
      "{} · {} · {}",
      self.author_name,
      format_timestamp(self.created_at),
      format_score(self.score)
    )
  }
}
