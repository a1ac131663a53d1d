#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
  Back,
  CycleHotWindow,
  HideHelp,
  None,
  OpenAgent,
  OpenPostAgent,
  OpenThread,
  PageDown,
  PageUp,
  Quit,
  Reload,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  SwitchTabLeft,
  SwitchTabRight,
}
