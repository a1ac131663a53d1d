use super::*;

pub(crate) struct AgentView {
  agent: AgentProfile,
  scroll: usize,
}

impl AgentView {
  pub(crate) fn agent(&self) -> &AgentProfile {
    &self.agent
  }

  pub(crate) fn fields(&self) -> Vec<(&'static str, String)> {
    let agent = &self.agent;

    let mut fields = vec![
      ("id", agent.id.clone()),
      (
        "about",
        agent
          .description
          .as_deref()
          .map(str::trim)
          .filter(|description| !description.is_empty())
          .unwrap_or("No description")
          .to_string(),
      ),
    ];

    let model_info = agent.model_info.as_ref().filter(|info| !info.is_empty());

    if let Some(model_info) = model_info {
      let model = model_info
        .iter()
        .map(|(key, value)| match value {
          Value::String(text) => format!("{key}: {text}"),
          other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join(", ");

      fields.push(("model", model));
    }

    if let Some(creator) = agent
      .creator_info
      .as_deref()
      .filter(|creator| !creator.trim().is_empty())
    {
      fields.push(("creator", creator.to_string()));
    }

    fields.push(("registered", format_timestamp(agent.created_at)));

    if let Some(last_active_at) = agent.last_active_at {
      fields.push(("last active", format_timestamp(last_active_at)));
    }

    if let Some(post_count) = agent.post_count {
      fields.push(("posts", post_count.to_string()));
    }

    if let Some(follower_count) = agent.follower_count {
      fields.push(("followers", follower_count.to_string()));
    }

    if let Some(reputation) = agent.reputation {
      fields.push(("reputation", format!("{reputation:.1}")));
    }

    fields
  }

  pub(crate) fn new(agent: AgentProfile) -> Self {
    Self { agent, scroll: 0 }
  }

  pub(crate) fn scroll(&self) -> usize {
    self.scroll
  }

  pub(crate) fn scroll_by(&mut self, delta: isize) {
    let last = self.fields().len().saturating_sub(1);

    self.scroll = if delta >= 0 {
      self.scroll.saturating_add(delta.unsigned_abs()).min(last)
    } else {
      self.scroll.saturating_sub(delta.unsigned_abs())
    };
  }
}

#[cfg(test)]
mod tests {
  use {super::*, chrono::TimeZone};

  fn agent() -> AgentProfile {
    AgentProfile {
      created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
      creator_info: None,
      description: None,
      follower_count: None,
      id: "a1".to_string(),
      last_active_at: None,
      model_info: None,
      name: "Alice".to_string(),
      post_count: None,
      reputation: None,
    }
  }

  fn labels(view: &AgentView) -> Vec<&'static str> {
    view.fields().into_iter().map(|(label, _)| label).collect()
  }

  #[test]
  fn absent_fields_are_skipped() {
    let view = AgentView::new(agent());

    assert_eq!(labels(&view), vec!["id", "about", "registered"]);
    assert_eq!(view.fields()[1].1, "No description");
    assert_eq!(view.fields()[2].1, "2025-01-01 00:00");
  }

  #[test]
  fn present_fields_are_shown_in_order() {
    let mut model_info = serde_json::Map::new();
    model_info.insert("model".to_string(), Value::String("m1".to_string()));
    model_info.insert("context".to_string(), Value::from(8192));

    let view = AgentView::new(AgentProfile {
      creator_info: Some("lab".to_string()),
      description: Some("  Curious  ".to_string()),
      follower_count: Some(0),
      last_active_at: Some(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()),
      model_info: Some(model_info),
      post_count: Some(12),
      reputation: Some(3.5),
      ..agent()
    });

    assert_eq!(
      labels(&view),
      vec![
        "id",
        "about",
        "model",
        "creator",
        "registered",
        "last active",
        "posts",
        "followers",
        "reputation",
      ]
    );

    let fields = view.fields();

    assert_eq!(fields[1].1, "Curious");
    assert_eq!(fields[2].1, "context: 8192, model: m1");
    assert_eq!(fields[7].1, "0");
    assert_eq!(fields[8].1, "3.5");
  }

  #[test]
  fn scrolling_is_clamped() {
    let mut view = AgentView::new(agent());

    view.scroll_by(10);
    assert_eq!(view.scroll(), 2);

    view.scroll_by(-10);
    assert_eq!(view.scroll(), 0);
  }
}
