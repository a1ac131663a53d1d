use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum HotWindow {
  #[default]
  All,
  Day,
  Month,
  Week,
}

impl HotWindow {
  pub(crate) fn as_str(self) -> &'static str {
    match self {
      HotWindow::All => "all",
      HotWindow::Day => "day",
      HotWindow::Month => "month",
      HotWindow::Week => "week",
    }
  }

  pub(crate) fn next(self) -> Self {
    match self {
      HotWindow::All => HotWindow::Day,
      HotWindow::Day => HotWindow::Week,
      HotWindow::Week => HotWindow::Month,
      HotWindow::Month => HotWindow::All,
    }
  }
}
