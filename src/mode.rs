use super::*;

pub(crate) enum Mode {
  Agent(AgentView),
  List(ListView<ListEntry>),
  Thread(CommentView),
}

impl Mode {
  pub(crate) fn handle_key(&mut self, key: KeyEvent, page: usize) -> Action {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    match self {
      Mode::List(_) => match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Left | KeyCode::Char('h') => Action::SwitchTabLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::SwitchTabRight,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('d') if control => Action::PageDown,
        KeyCode::Char('u') if control => Action::PageUp,
        KeyCode::Home => Action::SelectFirst,
        KeyCode::End => Action::SelectLast,
        KeyCode::Enter => Action::OpenThread,
        KeyCode::Char('a') => Action::OpenAgent,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('w') => Action::CycleHotWindow,
        _ => Action::None,
      },
      Mode::Thread(view) => match key.code {
        KeyCode::Char('q' | 'Q') => Action::Quit,
        KeyCode::Esc | KeyCode::Backspace => Action::Back,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char('a') => Action::OpenAgent,
        KeyCode::Char('p') => Action::OpenPostAgent,
        KeyCode::Down | KeyCode::Char('j') => {
          view.select_next();
          Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
          view.select_previous();
          Action::None
        }
        KeyCode::PageDown => {
          view.page_down(page);
          Action::None
        }
        KeyCode::PageUp => {
          view.page_up(page);
          Action::None
        }
        KeyCode::Char('d') if control => {
          view.page_down(page);
          Action::None
        }
        KeyCode::Char('u') if control => {
          view.page_up(page);
          Action::None
        }
        KeyCode::Left | KeyCode::Char('h') => {
          view.collapse_selected();
          Action::None
        }
        KeyCode::Right | KeyCode::Char('l') => {
          view.expand_selected();
          Action::None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
          view.toggle_selected();
          Action::None
        }
        KeyCode::Home => {
          view.select_index_at(0);
          Action::None
        }
        KeyCode::End => {
          view.select_index_at(usize::MAX);
          Action::None
        }
        _ => Action::None,
      },
      Mode::Agent(view) => match key.code {
        KeyCode::Char('q' | 'Q') => Action::Quit,
        KeyCode::Esc | KeyCode::Backspace => Action::Back,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Down | KeyCode::Char('j') => {
          view.scroll_by(1);
          Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
          view.scroll_by(-1);
          Action::None
        }
        _ => Action::None,
      },
    }
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    match self {
      Mode::Agent(_) => {}
      Mode::List(view) => view.set_offset(offset),
      Mode::Thread(view) => view.offset = offset,
    }
  }
}
