use super::*;

pub(crate) struct CommentView {
  pub(crate) comments_error: Option<String>,
  pub(crate) entries: Vec<CommentEntry>,
  pub(crate) offset: usize,
  pub(crate) post: Post,
  pub(crate) post_body: String,
  pub(crate) selected: Option<usize>,
}

impl CommentView {
  pub(crate) fn collapse_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if entry.expanded && entry.has_children() {
        entry.expanded = false;
      } else if let Some(parent) = entry.parent {
        self.selected = Some(parent);
      }
    }

    self.ensure_selection_visible();
  }

  fn ensure_selection_visible(&mut self) {
    let mut current = self.selected;

    while let Some(index) = current {
      if self.is_visible(index) {
        self.selected = Some(index);
        return;
      }

      current = self.entries.get(index).and_then(|entry| entry.parent);
    }

    self.selected = self.visible_indexes().first().copied();
  }

  pub(crate) fn expand_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if !entry.has_children() {
        return;
      }

      if entry.expanded {
        self.selected = entry.children.first().copied();
      } else {
        entry.expanded = true;
      }
    }

    self.ensure_selection_visible();
  }

  fn flatten(roots: &[CommentNode]) -> Vec<CommentEntry> {
    let mut entries = Vec::new();

    let mut stack = roots
      .iter()
      .rev()
      .map(|node| (node, None, 0))
      .collect::<Vec<(&CommentNode, Option<usize>, usize)>>();

    while let Some((node, parent, depth)) = stack.pop() {
      let index = entries.len();

      entries.push(CommentEntry::from_comment(&node.comment, parent, depth));

      if let Some(parent) = parent {
        entries[parent].children.push(index);
      }

      stack.extend(
        node
          .replies
          .iter()
          .rev()
          .map(|reply| (reply, Some(index), depth.saturating_add(1))),
      );
    }

    entries
  }

  fn is_visible(&self, index: usize) -> bool {
    let mut current = self.entries.get(index).and_then(|entry| entry.parent);

    while let Some(parent) = current {
      let Some(entry) = self.entries.get(parent) else {
        break;
      };

      if !entry.expanded {
        return false;
      }

      current = entry.parent;
    }

    true
  }

  fn move_by(&mut self, delta: isize) {
    let (visible, selected_pos) = self.visible_with_selection();

    if visible.is_empty() {
      self.selected = None;
      return;
    }

    let current = selected_pos.unwrap_or(0);
    let last = visible.len().saturating_sub(1);

    let target = if delta >= 0 {
      current.saturating_add(delta.unsigned_abs()).min(last)
    } else {
      current.saturating_sub(delta.unsigned_abs())
    };

    self.selected = Some(visible[target]);
  }

  pub(crate) fn new(thread: PostThread) -> Self {
    let PostThread { comments, post } = thread;

    let (entries, comments_error) = match comments {
      Ok(roots) => (Self::flatten(&roots), None),
      Err(error) => (Vec::new(), Some(error.root_cause().to_string())),
    };

    Self {
      comments_error,
      selected: (!entries.is_empty()).then_some(0),
      entries,
      offset: 0,
      post_body: markdown::to_plain_text(&post.content),
      post,
    }
  }

  pub(crate) fn page_down(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    self.move_by(isize::try_from(step).unwrap_or(isize::MAX));
  }

  pub(crate) fn page_up(&mut self, amount: usize) {
    let step = amount.saturating_sub(1).max(1);
    self.move_by(-isize::try_from(step).unwrap_or(isize::MAX));
  }

  pub(crate) fn select_index_at(&mut self, pos: usize) {
    let visible = self.visible_indexes();

    self.selected = visible
      .get(pos.min(visible.len().saturating_sub(1)))
      .copied();
  }

  pub(crate) fn select_next(&mut self) {
    self.move_by(1);
  }

  pub(crate) fn select_previous(&mut self) {
    self.move_by(-1);
  }

  pub(crate) fn selected_entry(&self) -> Option<&CommentEntry> {
    self.selected.and_then(|index| self.entries.get(index))
  }

  pub(crate) fn toggle_selected(&mut self) {
    if let Some(selected) = self.selected
      && let Some(entry) = self.entries.get_mut(selected)
    {
      if !entry.has_children() {
        return;
      }

      entry.expanded = !entry.expanded;
    }

    self.ensure_selection_visible();
  }

  pub(crate) fn visible_indexes(&self) -> Vec<usize> {
    let mut hidden = vec![false; self.entries.len()];
    let mut visible = Vec::new();

    for (index, entry) in self.entries.iter().enumerate() {
      hidden[index] = entry.parent.is_some_and(|parent| {
        hidden[parent] || !self.entries[parent].expanded
      });

      if !hidden[index] {
        visible.push(index);
      }
    }

    visible
  }

  pub(crate) fn visible_with_selection(&self) -> (Vec<usize>, Option<usize>) {
    let visible = self.visible_indexes();

    let selected_pos = self
      .selected
      .and_then(|selected| visible.iter().position(|&index| index == selected));

    (visible, selected_pos)
  }
}
