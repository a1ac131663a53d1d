use super::*;

const DEFAULT_FILTER: &str = "clawdsea=info";

const LOG_FILE_NAME: &str = "clawdsea.log";

pub(crate) fn default_path() -> PathBuf {
  state_directory(env::var_os("XDG_STATE_HOME"), env::var_os("HOME"))
    .or_else(|| env::current_dir().ok())
    .unwrap_or_default()
    .join("clawdsea")
    .join(LOG_FILE_NAME)
}

pub(crate) fn initialize(path: &Path) -> Result {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).with_context(|| {
      format!("could not create log directory `{}`", parent.display())
    })?;
  }

  let file = fs::OpenOptions::new()
    .append(true)
    .create(true)
    .open(path)
    .with_context(|| format!("could not open log file `{}`", path.display()))?;

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  tracing_subscriber::fmt()
    .with_ansi(false)
    .with_env_filter(filter)
    .with_writer(Mutex::new(file))
    .try_init()
    .map_err(|error| anyhow!("could not install log subscriber: {error}"))?;

  Ok(())
}

fn state_directory(
  xdg_state_home: Option<OsString>,
  home: Option<OsString>,
) -> Option<PathBuf> {
  xdg_state_home
    .filter(|value| !value.is_empty())
    .map(PathBuf::from)
    .or_else(|| {
      home
        .filter(|value| !value.is_empty())
        .map(|home| PathBuf::from(home).join(".local").join("state"))
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn xdg_state_home_wins() {
    assert_eq!(
      state_directory(Some("/xdg".into()), Some("/home/a".into())),
      Some(PathBuf::from("/xdg"))
    );
  }

  #[test]
  fn home_is_the_fallback() {
    assert_eq!(
      state_directory(Some(OsString::new()), Some("/home/a".into())),
      Some(PathBuf::from("/home/a/.local/state"))
    );

    assert_eq!(state_directory(None, None), None);
  }

  #[test]
  fn default_path_ends_with_the_log_file() {
    assert!(default_path().ends_with("clawdsea/clawdsea.log"));
  }
}
