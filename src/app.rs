use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn comment_list_item(
    entry: &CommentEntry,
    available_width: u16,
  ) -> ListItem<'static> {
    let indent = format!("{BASE_INDENT}{}", "  ".repeat(entry.depth));

    let toggle = entry.has_children().then_some(if entry.expanded {
      "[-]"
    } else {
      "[+]"
    });

    let mut header = vec![Span::raw(indent.clone())];

    if let Some(symbol) = toggle {
      header.push(Span::raw(symbol));
      header.push(Span::raw(" "));
    }

    header.push(Span::styled(
      entry.header(),
      Style::default().fg(Color::White),
    ));

    let mut lines = vec![Line::from(header)];

    let wrap_width = usize::from(available_width)
      .saturating_sub(indent.chars().count())
      .max(1);

    for line in wrap_paragraphs(&entry.body, wrap_width) {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(line, Style::default().fg(Color::DarkGray)),
      ]));
    }

    lines.push(Line::from(Span::raw(indent)));

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(layout[2].height as usize);

    let hot_window = self.state.hot_window();
    let active_tab = self.state.active_tab();

    let tab_titles = self
      .state
      .tabs()
      .iter()
      .map(|tab| Line::from(tab.label(hot_window).to_uppercase()))
      .collect::<Vec<_>>();

    let tabs_widget = Tabs::new(tab_titles)
      .select(active_tab)
      .style(Style::default().fg(Color::DarkGray))
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .divider(Span::raw(" "));

    frame.render_widget(tabs_widget, layout[0]);

    let overview = Paragraph::new(format!(
      "{BASE_INDENT}{}",
      self.state.overview()
    ))
    .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(overview, layout[1]);

    let empty_text = match self.state.tabs().get(active_tab) {
      Some(tab) if tab.loading.is_some() => LOADING_POSTS_STATUS.to_string(),
      Some(Tab {
        error: Some(error), ..
      }) => format!("Could not load posts: {error}. Press r to retry."),
      _ => "Nothing to show yet.".to_string(),
    };

    let offset = match self.state.mode_mut() {
      Mode::Agent(view) => {
        Self::draw_agent(frame, layout[2], view);
        0
      }
      Mode::List(view) => Self::draw_list(frame, layout[2], view, &empty_text),
      Mode::Thread(view) => Self::draw_thread(frame, layout[2], view),
    };

    self.state.mode_mut().set_offset(offset);

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[3]);

    self.state.help().draw(frame);
  }

  fn draw_agent(frame: &mut Frame, area: Rect, view: &AgentView) {
    let lines = view
      .fields()
      .into_iter()
      .map(|(label, value)| {
        Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::styled(
            format!("{label:<12}"),
            Style::default().fg(Color::DarkGray),
          ),
          Span::styled(value, Style::default().fg(Color::White)),
        ])
      })
      .collect::<Vec<_>>();

    let profile = Paragraph::new(lines)
      .block(
        Block::default()
          .title(view.agent().name.clone())
          .borders(Borders::ALL),
      )
      .wrap(Wrap { trim: false })
      .scroll((u16::try_from(view.scroll()).unwrap_or(u16::MAX), 0));

    frame.render_widget(profile, area);
  }

  fn draw_list(
    frame: &mut Frame,
    area: Rect,
    view: &ListView<ListEntry>,
    empty_text: &str,
  ) -> usize {
    let items = if view.is_empty() {
      vec![Self::placeholder(empty_text)]
    } else {
      view.items().iter().map(Self::post_list_item).collect()
    };

    let mut list_state = ListState::default()
      .with_selected(view.selected())
      .with_offset(view.offset());

    frame.render_stateful_widget(Self::list(items), area, &mut list_state);

    list_state.offset()
  }

  fn draw_thread(frame: &mut Frame, area: Rect, view: &CommentView) -> usize {
    let header = Self::post_header(view, area.width);

    let header_height = u16::try_from(header.len())
      .unwrap_or(u16::MAX)
      .min(area.height / 2);

    let sections = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(header_height), Constraint::Min(0)])
      .split(area);

    frame.render_widget(
      Paragraph::new(header).block(Block::default().borders(Borders::BOTTOM)),
      sections[0],
    );

    let (visible, selected_pos) = view.visible_with_selection();

    let items = if visible.is_empty() {
      let text = view.comments_error.as_ref().map_or_else(
        || "No comments yet.".to_string(),
        |error| format!("Could not load comments: {error}"),
      );

      vec![Self::placeholder(&text)]
    } else {
      visible
        .iter()
        .map(|&index| {
          Self::comment_list_item(&view.entries[index], sections[1].width)
        })
        .collect()
    };

    let mut list_state = ListState::default()
      .with_selected(selected_pos)
      .with_offset(view.offset.min(selected_pos.unwrap_or(0)));

    frame.render_stateful_widget(
      Self::list(items),
      sections[1],
      &mut list_state,
    );

    list_state.offset()
  }

  fn execute_effect(&self, effect: Effect) {
    let (client, sender) = (self.client.clone(), self.event_tx.clone());

    match effect {
      Effect::FetchAgent {
        agent_id,
        request_id,
      } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::Agent {
            request_id,
            result: client.fetch_agent(&agent_id).await,
          });
        });
      }
      Effect::FetchFeed {
        query,
        request_id,
        tab_index,
      } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::Feed {
            offset: query.offset,
            request_id,
            result: client.fetch_feed_page(query).await,
            tab_index,
          });
        });
      }
      Effect::FetchThread {
        post_id,
        request_id,
      } => {
        self.handle.spawn(async move {
          let _ = sender.send(Event::Thread {
            request_id,
            result: client.fetch_post_thread(&post_id).await,
          });
        });
      }
    }
  }

  fn list(items: Vec<ListItem<'static>>) -> List<'static> {
    List::new(items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("")
  }

  pub(crate) fn new(client: Client, state: State) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
    }
  }

  fn placeholder(text: &str) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
      Span::raw(BASE_INDENT),
      Span::raw(text.to_string()),
    ]))
  }

  fn post_header(view: &CommentView, width: u16) -> Vec<Line<'static>> {
    let entry = ListEntry::from(view.post.clone());

    let mut lines = vec![
      Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(
          entry.title,
          Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        ),
      ]),
      Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(entry.detail, Style::default().fg(Color::DarkGray)),
      ]),
    ];

    if let Some(tags) = entry.tags {
      lines.push(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(tags, Style::default().fg(Color::Blue)),
      ]));
    }

    lines.push(Line::default());

    let wrap_width = usize::from(width)
      .saturating_sub(BASE_INDENT.chars().count())
      .max(1);

    for line in wrap_paragraphs(&view.post_body, wrap_width) {
      lines.push(Line::from(vec![Span::raw(BASE_INDENT), Span::raw(line)]));
    }

    lines.push(Line::default());

    lines
  }

  fn post_list_item(entry: &ListEntry) -> ListItem<'static> {
    let mut lines = vec![
      Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(entry.title.clone(), Style::default().fg(Color::White)),
      ]),
      Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(
          entry.detail.clone(),
          Style::default().fg(Color::DarkGray),
        ),
      ]),
    ];

    if let Some(tags) = &entry.tags {
      lines.push(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(tags.clone(), Style::default().fg(Color::Blue)),
      ]));
    }

    lines.push(Line::from(Span::raw(BASE_INDENT)));

    ListItem::new(lines)
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let action = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else {
        let page = self.state.list_height().max(1);
        self.state.mode_mut().handle_key(key, page)
      };

      let dispatch = self.state.dispatch_action(action);

      for effect in dispatch.effects {
        self.execute_effect(effect);
      }

      if dispatch.should_exit {
        break;
      }
    }

    Ok(())
  }
}
