use {
  action::Action,
  agent_profile::AgentProfile,
  agent_view::AgentView,
  anyhow::{Context, anyhow},
  api_base::ApiBase,
  app::App,
  arguments::Arguments,
  chrono::{DateTime, NaiveDateTime, Utc},
  clap::{Parser, ValueEnum},
  client::Client,
  client_config::ClientConfig,
  comment::Comment,
  comment_entry::CommentEntry,
  comment_node::CommentNode,
  comment_tree::build_comment_tree,
  comment_view::CommentView,
  config_error::ConfigError,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  dispatch::Dispatch,
  effect::Effect,
  event::Event,
  execution_context::ExecutionContext,
  feed_page::FeedPage,
  feed_query::FeedQuery,
  feed_sort::FeedSort,
  fetch_error::FetchError,
  front_page::FrontPage,
  futures::future::join_all,
  help_view::HelpView,
  hot_window::HotWindow,
  list_entry::ListEntry,
  list_view::ListView,
  mode::Mode,
  post::Post,
  post_thread::PostThread,
  pulldown_cmark::{
    Event as MarkdownEvent, Parser as MarkdownParser, Tag, TagEnd,
  },
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
  },
  reqwest::StatusCode,
  retry_policy::RetryPolicy,
  serde::{
    Deserialize, Deserializer,
    de::{self, DeserializeOwned, Unexpected},
  },
  serde_json::Value,
  state::State,
  stats::Stats,
  std::{
    backtrace::BacktraceStatus,
    collections::HashMap,
    env,
    ffi::OsString,
    fs,
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
  },
  tab::Tab,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, info, warn},
  tracing_subscriber::EnvFilter,
  transient_message::TransientMessage,
  url::{ParseError, Url},
  utils::{
    deserialize_id, deserialize_optional_id, deserialize_optional_timestamp,
    deserialize_timestamp, format_score, format_timestamp, truncate,
    wrap_paragraphs,
  },
};

mod action;
mod agent_profile;
mod agent_view;
mod api_base;
mod app;
mod arguments;
mod client;
mod client_config;
mod comment;
mod comment_entry;
mod comment_node;
mod comment_tree;
mod comment_view;
mod config_error;
mod dispatch;
mod effect;
mod event;
mod execution_context;
mod feed_page;
mod feed_query;
mod feed_sort;
mod fetch_error;
mod front_page;
mod help_view;
mod hot_window;
mod list_entry;
mod list_view;
mod logging;
mod markdown;
mod mode;
mod post;
mod post_thread;
mod retry_policy;
mod state;
mod stats;
mod tab;
mod transient_message;
mod utils;

const LIST_STATUS: &str = "↑/k up • ↓/j down • enter open • a agent • w hot window • r reload • q quit • ? help";

const THREAD_STATUS: &str = "↑/k up • ↓/j down • ←/h collapse • →/l expand • a author • p poster • esc back • ? help";

const AGENT_STATUS: &str = "↑/k up • ↓/j down • esc back • q quit • ? help";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_AGENT_STATUS: &str = "Loading agent...";
const LOADING_POSTS_STATUS: &str = "Loading posts...";
const LOADING_THREAD_STATUS: &str = "Loading post...";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Feed:
  ← / h   previous tab
  → / l   next tab
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first post
  end     jump to last loaded post
  enter   open the selected post
  a       show the author's profile
  w       change the hot window (all, day, week, month)
  r       reload the current tab
  scroll  keep going past the end to load more posts
  q       quit
  esc     close help or quit from the feed
  ?       toggle this help

Post:
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ← / h   collapse or go to parent
  → / l   expand or go to first reply
  enter   toggle collapse or expand
  a       show the selected reply's author
  p       show the post author's profile
  esc     return to the feed

Agent:
  ↑ / k   scroll up
  ↓ / j   scroll down
  esc     return to the previous view
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  let log_file = arguments
    .log_file
    .clone()
    .unwrap_or_else(logging::default_path);

  logging::initialize(&log_file)?;

  let config = ClientConfig::from_arguments(&arguments)
    .context("could not resolve the API base")?;

  info!(
    base_url = %config.base_url,
    timeout_ms = config.timeout.as_millis(),
    retries = config.retry.retries,
    "starting"
  );

  let client = Client::new(config)?;

  let page_size = usize::from(arguments.page_size);

  let front = client.load_front_page(page_size, arguments.hot_window).await;

  let state = State::new(front, page_size, arguments.hot_window);

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, state);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
