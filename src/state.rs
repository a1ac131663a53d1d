use super::*;

pub(crate) struct State {
  active_tab: usize,
  help: HelpView,
  history: Vec<Mode>,
  hot_window: HotWindow,
  list_height: usize,
  message: String,
  mode: Mode,
  next_request_id: u64,
  overview: String,
  page_size: usize,
  pending_agent: Option<u64>,
  pending_effects: Vec<Effect>,
  pending_selections: Vec<Option<usize>>,
  pending_thread: Option<u64>,
  tab_views: Vec<Option<ListView<ListEntry>>>,
  tabs: Vec<Tab>,
  transient_message: Option<TransientMessage>,
}

impl State {
  pub(crate) fn active_tab(&self) -> usize {
    self.active_tab
  }

  fn back(&mut self) {
    self.pending_agent = None;
    self.pending_thread = None;

    match self.history.pop() {
      Some(previous) => {
        let status = match previous {
          Mode::Agent(_) => AGENT_STATUS,
          Mode::List(_) => LIST_STATUS,
          Mode::Thread(_) => THREAD_STATUS,
        };

        self.mode = previous;
        self.set_status(status);
      }
      None => {
        self.restore_active_list_view();
        self.set_status(LIST_STATUS);
      }
    }
  }

  fn current_entry(&self) -> Option<&ListEntry> {
    self
      .list_view(self.active_tab)
      .and_then(ListView::selected_item)
  }

  fn cycle_hot_window(&mut self) {
    self.hot_window = self.hot_window.next();

    info!(hot_window = self.hot_window.as_str(), "hot window changed");

    let Some(tab_index) =
      self.tabs.iter().position(|tab| tab.sort == FeedSort::Hot)
    else {
      return;
    };

    if let Some(tab) = self.tabs.get_mut(tab_index) {
      tab.error = None;
      tab.has_next = false;
    }

    if let Some(list) = self.list_view_mut(tab_index) {
      *list = ListView::default();
    }

    self.reload(tab_index);
  }

  pub(crate) fn dispatch_action(&mut self, action: Action) -> Dispatch {
    debug_assert!(
      self.pending_effects.is_empty(),
      "action dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match action {
      Action::Back => self.back(),
      Action::CycleHotWindow => self.cycle_hot_window(),
      Action::HideHelp => self.help.hide(&mut self.message),
      Action::None => {}
      Action::OpenAgent => self.open_selected_agent(),
      Action::OpenPostAgent => self.open_post_agent(),
      Action::OpenThread => self.open_thread(),
      Action::PageDown => self.page_down(),
      Action::PageUp => self.page_up(),
      Action::Quit => should_exit = true,
      Action::Reload => self.reload(self.active_tab),
      Action::SelectFirst => self.select_index(0),
      Action::SelectLast => self.select_last(),
      Action::SelectNext => self.select_next(),
      Action::SelectPrevious => self.select_previous(),
      Action::ShowHelp => self.help.show(&mut self.message),
      Action::SwitchTabLeft => self.switch_tab_left(),
      Action::SwitchTabRight => self.switch_tab_right(),
    }

    Dispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    }
  }

  fn ensure_item(&mut self, tab_index: usize, target: usize) {
    let len = self
      .list_view(tab_index)
      .map_or(0, ListView::<ListEntry>::len);

    if target < len {
      return;
    }

    let Some(tab) = self.tabs.get(tab_index) else {
      return;
    };

    if !tab.has_next {
      return;
    }

    let is_loading = tab.loading.is_some();

    if let Some(slot) = self.pending_selections.get_mut(tab_index) {
      *slot = Some(target);
    }

    if !is_loading {
      self.start_load(tab_index, len);
    }
  }

  fn enter(&mut self, mode: Mode, status: &str) {
    match std::mem::replace(&mut self.mode, mode) {
      Mode::List(view) => {
        if let Some(slot) = self.tab_views.get_mut(self.active_tab) {
          *slot = Some(view);
        }
      }
      previous => self.history.push(previous),
    }

    self.set_status(status);
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::Agent { request_id, result } => {
        if self.pending_agent != Some(request_id) {
          debug!(request_id, "dropping stale agent response");
          return;
        }

        self.pending_agent = None;

        match result {
          Ok(agent) => {
            self.enter(Mode::Agent(AgentView::new(agent)), AGENT_STATUS);
          }
          Err(error) => {
            self.report(format!("Could not load agent: {}", error.summary()));
          }
        }
      }
      Event::Feed {
        offset,
        request_id,
        result,
        tab_index,
      } => self.handle_feed(tab_index, offset, request_id, result),
      Event::Thread { request_id, result } => {
        if self.pending_thread != Some(request_id) {
          debug!(request_id, "dropping stale thread response");
          return;
        }

        self.pending_thread = None;

        match result {
          Ok(thread) => {
            self.enter(Mode::Thread(CommentView::new(thread)), THREAD_STATUS);
          }
          Err(error) => {
            self.report(format!("Could not load post: {}", error.summary()));
          }
        }
      }
    }
  }

  fn handle_feed(
    &mut self,
    tab_index: usize,
    offset: usize,
    request_id: u64,
    result: Result<FeedPage, FetchError>,
  ) {
    let Some(tab) = self.tabs.get_mut(tab_index) else {
      return;
    };

    if tab.loading != Some(request_id) {
      debug!(request_id, tab_index, "dropping stale feed response");
      return;
    }

    tab.loading = None;

    let target = self
      .pending_selections
      .get_mut(tab_index)
      .and_then(Option::take);

    match result {
      Ok(page) => {
        tab.error = None;
        tab.has_next = page.has_next;

        let entries = page.posts.into_iter().map(ListEntry::from);

        if let Some(list) = self.list_view_mut(tab_index) {
          if offset == 0 {
            *list = ListView::new(entries.collect());
          } else {
            list.append(entries);
          }

          if let Some(target) = target {
            list.select(target);
          }
        }

        if matches!(self.mode, Mode::List(_)) {
          self.set_status(LIST_STATUS);
        }
      }
      Err(error) => {
        if offset == 0 {
          tab.error = Some(error.summary());
        }

        self.report(format!("Could not load posts: {}", error.summary()));
      }
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  pub(crate) fn hot_window(&self) -> HotWindow {
    self.hot_window
  }

  pub(crate) fn list_height(&self) -> usize {
    self.list_height
  }

  fn list_view(&self, index: usize) -> Option<&ListView<ListEntry>> {
    if let Mode::List(view) = &self.mode
      && index == self.active_tab
    {
      return Some(view);
    }

    self.tab_views.get(index).and_then(Option::as_ref)
  }

  fn list_view_mut(
    &mut self,
    index: usize,
  ) -> Option<&mut ListView<ListEntry>> {
    match &mut self.mode {
      Mode::List(view) if index == self.active_tab => Some(view),
      _ => self.tab_views.get_mut(index).and_then(Option::as_mut),
    }
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn mode_mut(&mut self) -> &mut Mode {
    &mut self.mode
  }

  pub(crate) fn new(
    front: FrontPage,
    page_size: usize,
    hot_window: HotWindow,
  ) -> Self {
    let FrontPage { feeds, stats } = front;

    let mut tabs = Vec::new();
    let mut tab_views = Vec::new();
    let mut failures = Vec::new();

    for (sort, result) in feeds {
      match result {
        Ok(page) => {
          tabs.push(Tab {
            error: None,
            has_next: page.has_next,
            loading: None,
            sort,
          });

          tab_views.push(Some(ListView::new(
            page.posts.into_iter().map(ListEntry::from).collect(),
          )));
        }
        Err(error) => {
          let summary = error.summary();

          failures.push(format!("{}: {summary}", sort.as_str()));

          tabs.push(Tab {
            error: Some(summary),
            has_next: false,
            loading: None,
            sort,
          });

          tab_views.push(Some(ListView::default()));
        }
      }
    }

    let initial_view = tab_views
      .get_mut(0)
      .and_then(Option::take)
      .unwrap_or_default();

    let overview = match &stats {
      Ok(stats) => format!(
        "{} agents · {} posts",
        stats.agents_count, stats.posts_count
      ),
      Err(error) => format!("No stats: {}", error.summary()),
    };

    let mut state = Self {
      active_tab: 0,
      help: HelpView::new(),
      history: Vec::new(),
      hot_window,
      list_height: 0,
      message: LIST_STATUS.into(),
      mode: Mode::List(initial_view),
      next_request_id: 0,
      overview,
      page_size,
      pending_agent: None,
      pending_effects: Vec::new(),
      pending_selections: vec![None; tabs.len()],
      pending_thread: None,
      tab_views,
      tabs,
      transient_message: None,
    };

    if !failures.is_empty() {
      state.set_transient_message(format!(
        "Could not load {}",
        failures.join("; ")
      ));
    }

    state
  }

  fn next_request_id(&mut self) -> u64 {
    let request_id = self.next_request_id;
    self.next_request_id = self.next_request_id.wrapping_add(1);
    request_id
  }

  fn open_post_agent(&mut self) {
    if let Mode::Thread(view) = &self.mode {
      let agent_id = view.post.author_agent_id.clone();
      self.request_agent(agent_id);
    }
  }

  fn open_selected_agent(&mut self) {
    let agent_id = match &self.mode {
      Mode::Agent(_) => None,
      Mode::List(view) => view
        .selected_item()
        .map(|entry| entry.author_agent_id.clone()),
      Mode::Thread(view) => Some(view.selected_entry().map_or_else(
        || view.post.author_agent_id.clone(),
        |entry| entry.author_agent_id.clone(),
      )),
    };

    if let Some(agent_id) = agent_id {
      self.request_agent(agent_id);
    }
  }

  fn open_thread(&mut self) {
    let Some(post_id) = self.current_entry().map(|entry| entry.id.clone())
    else {
      return;
    };

    let request_id = self.next_request_id();

    self.pending_thread = Some(request_id);

    self.set_status(LOADING_THREAD_STATUS);

    self.pending_effects.push(Effect::FetchThread { post_id, request_id });
  }

  pub(crate) fn overview(&self) -> &str {
    &self.overview
  }

  fn page_down(&mut self) {
    let current = self.selected_in_active_tab();
    self.select_index(current.saturating_add(self.page_jump()));
  }

  fn page_jump(&self) -> usize {
    self.list_height.saturating_sub(1).max(1)
  }

  fn page_up(&mut self) {
    let current = self.selected_in_active_tab();
    self.select_index(current.saturating_sub(self.page_jump()));
  }

  fn reload(&mut self, tab_index: usize) {
    if let Some(slot) = self.pending_selections.get_mut(tab_index) {
      *slot = None;
    }

    self.start_load(tab_index, 0);
  }

  fn report(&mut self, message: String) {
    if !self.help.is_visible() {
      self.set_transient_message(message);
    }
  }

  fn request_agent(&mut self, agent_id: String) {
    let request_id = self.next_request_id();

    self.pending_agent = Some(request_id);

    self.set_status(LOADING_AGENT_STATUS);

    self.pending_effects.push(Effect::FetchAgent {
      agent_id,
      request_id,
    });
  }

  fn restore_active_list_view(&mut self) {
    let view = self
      .tab_views
      .get_mut(self.active_tab)
      .and_then(Option::take);

    match view {
      Some(view) => self.mode = Mode::List(view),
      None if !matches!(self.mode, Mode::List(_)) => {
        self.mode = Mode::List(ListView::default());
      }
      None => {}
    }
  }

  fn select_index(&mut self, target: usize) {
    self.ensure_item(self.active_tab, target);

    if let Some(list) = self.list_view_mut(self.active_tab)
      && target < list.len()
    {
      list.select(target);
    }
  }

  fn select_last(&mut self) {
    let len = self
      .list_view(self.active_tab)
      .map_or(0, ListView::<ListEntry>::len);

    self.select_index(len.saturating_sub(1));
  }

  fn select_next(&mut self) {
    let current = self.selected_in_active_tab();
    self.select_index(current.saturating_add(1));
  }

  fn select_previous(&mut self) {
    let current = self.selected_in_active_tab();
    self.select_index(current.saturating_sub(1));
  }

  fn selected_in_active_tab(&self) -> usize {
    self
      .list_view(self.active_tab)
      .and_then(ListView::selected)
      .unwrap_or(0)
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  fn set_status(&mut self, status: &str) {
    if !self.help.is_visible() {
      self.message = status.into();
    }
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let restore = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.restore().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), restore));

    self.message = message;
  }

  fn start_load(&mut self, tab_index: usize, offset: usize) {
    let request_id = self.next_request_id();

    let (hot_window, limit) = (self.hot_window, self.page_size);

    let Some(tab) = self.tabs.get_mut(tab_index) else {
      return;
    };

    tab.loading = Some(request_id);

    let query =
      FeedQuery::new(tab.sort, limit, offset).with_hot_window(hot_window);

    self.set_status(LOADING_POSTS_STATUS);

    self.pending_effects.push(Effect::FetchFeed {
      query,
      request_id,
      tab_index,
    });
  }

  fn store_active_list_view(&mut self) {
    if let Mode::List(view) = &mut self.mode
      && let Some(slot) = self.tab_views.get_mut(self.active_tab)
    {
      *slot = Some(std::mem::take(view));
    }
  }

  fn switch_tab_left(&mut self) {
    let tab_count = self.tabs.len();

    if tab_count != 0 {
      self.store_active_list_view();
      self.active_tab = (self.active_tab + tab_count - 1) % tab_count;
      self.restore_active_list_view();
    }
  }

  fn switch_tab_right(&mut self) {
    let tab_count = self.tabs.len();

    if tab_count != 0 {
      self.store_active_list_view();
      self.active_tab = (self.active_tab + 1) % tab_count;
      self.restore_active_list_view();
    }
  }

  pub(crate) fn tabs(&self) -> &[Tab] {
    &self.tabs
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = &self.transient_message {
      if self.message != transient.text() {
        self.transient_message = None;
      } else if transient.is_expired() {
        self.message = transient.restore().to_string();
        self.transient_message = None;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, chrono::TimeZone};

  fn post(id: &str) -> Post {
    Post {
      author_agent_id: format!("agent-{id}"),
      author_name: format!("Agent {id}"),
      author_reputation: None,
      content: format!("content {id}"),
      created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
      id: id.to_string(),
      reply_count: Some(0),
      score: 0,
      tags: None,
      title: Some(format!("Post {id}")),
    }
  }

  fn page(ids: &[&str], has_next: bool) -> FeedPage {
    FeedPage {
      has_next,
      posts: ids.iter().map(|id| post(id)).collect(),
    }
  }

  fn failure() -> FetchError {
    FetchError::FeedUnavailable {
      source: Box::new(FetchError::InvalidUrl {
        url: "nowhere".to_string(),
      }),
    }
  }

  fn sample_state() -> State {
    State::new(
      FrontPage {
        feeds: vec![
          (FeedSort::Hot, Ok(page(&["p1", "p2"], true))),
          (FeedSort::Latest, Err(failure())),
        ],
        stats: Ok(Stats {
          agents_count: 3,
          posts_count: 40,
        }),
      },
      2,
      HotWindow::All,
    )
  }

  fn thread(post_id: &str) -> PostThread {
    PostThread {
      comments: Ok(Vec::new()),
      post: post(post_id),
    }
  }

  fn agent(id: &str) -> AgentProfile {
    AgentProfile {
      created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
      creator_info: None,
      description: None,
      follower_count: None,
      id: id.to_string(),
      last_active_at: None,
      model_info: None,
      name: "Alice".to_string(),
      post_count: None,
      reputation: None,
    }
  }

  fn single_effect(dispatch: Dispatch) -> Effect {
    assert_eq!(dispatch.effects.len(), 1, "expected exactly one effect");
    dispatch.effects.into_iter().next().unwrap()
  }

  #[test]
  fn front_page_failures_are_reported_per_part() {
    let state = sample_state();

    assert_eq!(state.overview(), "3 agents · 40 posts");
    assert_eq!(state.tabs()[0].error, None);
    assert_eq!(
      state.tabs()[1].error.as_deref(),
      Some("invalid request URL `nowhere`")
    );
    assert_eq!(
      state.message(),
      "Could not load latest: invalid request URL `nowhere`"
    );
  }

  #[test]
  fn missing_stats_show_the_reason() {
    let state = State::new(
      FrontPage {
        feeds: vec![(FeedSort::Hot, Ok(page(&["p1"], false)))],
        stats: Err(FetchError::StatsUnavailable {
          source: Box::new(FetchError::InvalidUrl {
            url: "nowhere".to_string(),
          }),
        }),
      },
      2,
      HotWindow::All,
    );

    assert_eq!(state.overview(), "No stats: invalid request URL `nowhere`");
  }

  #[test]
  fn open_thread_emits_fetch_effect() {
    let mut state = sample_state();

    let dispatch = state.dispatch_action(Action::OpenThread);

    assert!(!dispatch.should_exit);

    assert_eq!(
      single_effect(dispatch),
      Effect::FetchThread {
        post_id: "p1".to_string(),
        request_id: 0,
      }
    );

    assert_eq!(state.message, LOADING_THREAD_STATUS);
  }

  #[test]
  fn stale_thread_responses_are_dropped() {
    let mut state = sample_state();

    state.dispatch_action(Action::OpenThread);
    state.dispatch_action(Action::SelectNext);
    state.dispatch_action(Action::OpenThread);

    state.handle_event(Event::Thread {
      request_id: 0,
      result: Ok(thread("p1")),
    });

    assert!(matches!(state.mode, Mode::List(_)));

    state.handle_event(Event::Thread {
      request_id: 1,
      result: Ok(thread("p2")),
    });

    let Mode::Thread(view) = &state.mode else {
      panic!("expected the thread view");
    };

    assert_eq!(view.post.id, "p2");
    assert_eq!(state.message, THREAD_STATUS);
  }

  #[test]
  fn back_from_thread_restores_the_list_selection() {
    let mut state = sample_state();

    state.dispatch_action(Action::SelectNext);
    state.dispatch_action(Action::OpenThread);

    state.handle_event(Event::Thread {
      request_id: 0,
      result: Ok(thread("p2")),
    });

    state.dispatch_action(Action::Back);

    let Mode::List(view) = &state.mode else {
      panic!("expected the list view");
    };

    assert_eq!(view.selected(), Some(1));
    assert_eq!(state.message, LIST_STATUS);
  }

  #[test]
  fn agent_opened_from_a_thread_returns_to_it() {
    let mut state = sample_state();

    state.dispatch_action(Action::OpenThread);

    state.handle_event(Event::Thread {
      request_id: 0,
      result: Ok(thread("p1")),
    });

    let effect = single_effect(state.dispatch_action(Action::OpenPostAgent));

    assert_eq!(
      effect,
      Effect::FetchAgent {
        agent_id: "agent-p1".to_string(),
        request_id: 1,
      }
    );

    state.handle_event(Event::Agent {
      request_id: 1,
      result: Ok(agent("agent-p1")),
    });

    assert!(matches!(state.mode, Mode::Agent(_)));

    state.dispatch_action(Action::Back);
    assert!(matches!(state.mode, Mode::Thread(_)));

    state.dispatch_action(Action::Back);
    assert!(matches!(state.mode, Mode::List(_)));
  }

  #[test]
  fn failed_post_keeps_the_list_and_reports() {
    let mut state = sample_state();

    state.dispatch_action(Action::OpenThread);

    state.handle_event(Event::Thread {
      request_id: 0,
      result: Err(FetchError::NotFound {
        id: "p1".to_string(),
        resource: "post",
        source: Box::new(FetchError::InvalidUrl {
          url: "nowhere".to_string(),
        }),
      }),
    });

    assert!(matches!(state.mode, Mode::List(_)));
    assert_eq!(state.message, "Could not load post: post `p1` not found");
  }

  #[test]
  fn scrolling_past_the_end_loads_the_next_page() {
    let mut state = sample_state();

    state.dispatch_action(Action::SelectNext);

    let effect = single_effect(state.dispatch_action(Action::SelectNext));

    let Effect::FetchFeed {
      query,
      request_id,
      tab_index,
    } = effect
    else {
      panic!("expected a feed fetch");
    };

    assert_eq!(tab_index, 0);
    assert_eq!(query.offset, 2);
    assert_eq!(query.limit, 2);
    assert_eq!(query.sort, FeedSort::Hot);

    assert!(
      state.dispatch_action(Action::SelectNext).effects.is_empty(),
      "a page that is already loading is not requested twice"
    );

    state.handle_event(Event::Feed {
      offset: 2,
      request_id,
      result: Ok(page(&["p3", "p4"], false)),
      tab_index,
    });

    let Mode::List(view) = &state.mode else {
      panic!("expected the list view");
    };

    assert_eq!(view.len(), 4);
    assert_eq!(view.selected(), Some(2));
    assert!(!state.tabs()[0].has_next);

    assert!(state.dispatch_action(Action::PageDown).effects.is_empty());
  }

  #[test]
  fn cycling_the_hot_window_reloads_and_drops_older_pages() {
    let mut state = sample_state();

    state.dispatch_action(Action::SelectNext);

    let Effect::FetchFeed {
      request_id: stale, ..
    } = single_effect(state.dispatch_action(Action::SelectNext))
    else {
      panic!("expected a feed fetch");
    };

    let Effect::FetchFeed {
      query, request_id, ..
    } = single_effect(state.dispatch_action(Action::CycleHotWindow))
    else {
      panic!("expected a feed fetch");
    };

    assert_eq!(state.hot_window(), HotWindow::Day);
    assert_eq!(query.offset, 0);
    assert_eq!(query.hot_window, HotWindow::Day);

    state.handle_event(Event::Feed {
      offset: 2,
      request_id: stale,
      result: Ok(page(&["old"], false)),
      tab_index: 0,
    });

    state.handle_event(Event::Feed {
      offset: 0,
      request_id,
      result: Ok(page(&["d1"], false)),
      tab_index: 0,
    });

    let Mode::List(view) = &state.mode else {
      panic!("expected the list view");
    };

    assert_eq!(
      view
        .items()
        .iter()
        .map(|entry| entry.id.as_str())
        .collect::<Vec<_>>(),
      vec!["d1"]
    );
  }

  #[test]
  fn reload_replaces_a_failed_tab() {
    let mut state = sample_state();

    state.dispatch_action(Action::SwitchTabRight);

    let Effect::FetchFeed {
      query, request_id, ..
    } = single_effect(state.dispatch_action(Action::Reload))
    else {
      panic!("expected a feed fetch");
    };

    assert_eq!(query.sort, FeedSort::Latest);

    state.handle_event(Event::Feed {
      offset: 0,
      request_id,
      result: Ok(page(&["l1"], true)),
      tab_index: 1,
    });

    assert_eq!(state.tabs()[1].error, None);
    assert!(state.tabs()[1].has_next);
    assert_eq!(state.current_entry().map(|e| e.id.as_str()), Some("l1"));
  }

  #[test]
  fn quit_exits() {
    assert!(sample_state().dispatch_action(Action::Quit).should_exit);
  }
}
