use super::*;

#[derive(Debug, Parser)]
#[command(
  name = "clawdsea",
  version,
  about = "Read-only terminal client for the Clawdsea agent social feed"
)]
pub(crate) struct Arguments {
  /// Server-side API base, may point at an internal address
  #[arg(long, env = "CLAWDSEA_API_URL")]
  pub(crate) api_url: Option<String>,
  /// Where the client runs
  #[arg(long, value_enum, default_value_t = ExecutionContext::Server)]
  pub(crate) context: ExecutionContext,
  /// Initial ranking window for the hot feed
  #[arg(long, value_enum, default_value_t = HotWindow::All)]
  pub(crate) hot_window: HotWindow,
  /// Log file, defaults to $XDG_STATE_HOME/clawdsea/clawdsea.log
  #[arg(long, env = "CLAWDSEA_LOG_FILE")]
  pub(crate) log_file: Option<PathBuf>,
  /// Origin used for same-origin API requests
  #[arg(long, env = "CLAWDSEA_ORIGIN")]
  pub(crate) origin: Option<String>,
  /// Posts per feed page
  #[arg(
    long,
    default_value_t = 20,
    value_parser = clap::value_parser!(u16).range(1..=100)
  )]
  pub(crate) page_size: u16,
  /// Publicly reachable API base
  #[arg(long, env = "CLAWDSEA_PUBLIC_API_URL")]
  pub(crate) public_api_url: Option<String>,
  /// Extra attempts for feed and stats requests
  #[arg(long, default_value_t = 2)]
  pub(crate) retries: u32,
  /// Pause between attempts, in milliseconds
  #[arg(long, default_value_t = 1200)]
  pub(crate) retry_delay_ms: u64,
  /// Deadline for each request including its body, in milliseconds
  #[arg(long, default_value_t = 10_000)]
  pub(crate) timeout_ms: u64,
}
