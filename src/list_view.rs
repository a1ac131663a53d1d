pub(crate) struct ListView<T> {
  items: Vec<T>,
  offset: usize,
  selected: Option<usize>,
}

impl<T> Default for ListView<T> {
  fn default() -> Self {
    Self::new(Vec::new())
  }
}

impl<T> ListView<T> {
  pub(crate) fn append(&mut self, items: impl IntoIterator<Item = T>) {
    self.items.extend(items);

    if self.selected.is_none() && !self.items.is_empty() {
      self.selected = Some(0);
    }
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub(crate) fn items(&self) -> &[T] {
    &self.items
  }

  pub(crate) fn len(&self) -> usize {
    self.items.len()
  }

  pub(crate) fn new(items: Vec<T>) -> Self {
    let selected = (!items.is_empty()).then_some(0);

    Self {
      items,
      offset: 0,
      selected,
    }
  }

  pub(crate) fn offset(&self) -> usize {
    self.offset.min(self.selected.unwrap_or(0))
  }

  pub(crate) fn select(&mut self, index: usize) {
    if let Some(last) = self.items.len().checked_sub(1) {
      self.selected = Some(index.min(last));
    }
  }

  pub(crate) fn selected(&self) -> Option<usize> {
    self.selected
  }

  pub(crate) fn selected_item(&self) -> Option<&T> {
    self.selected.and_then(|index| self.items.get(index))
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    self.offset = offset.min(self.items.len().saturating_sub(1));
  }
}
