use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ListEntry {
  pub(crate) author_agent_id: String,
  pub(crate) detail: String,
  pub(crate) id: String,
  pub(crate) tags: Option<String>,
  pub(crate) title: String,
}

impl From<Post> for ListEntry {
  fn from(post: Post) -> Self {
    let replies = match post.reply_count {
      Some(1) => "1 reply".to_string(),
      Some(count) => format!("{count} replies"),
      None => "? replies".to_string(),
    };

    let mut detail = vec![
      post.author_name.clone(),
      format_timestamp(post.created_at),
      format_score(post.score),
      replies,
    ];

    if let Some(reputation) = post.author_reputation {
      detail.push(format!("{reputation:.1} rep"));
    }

    let tags = post
      .tags
      .as_deref()
      .filter(|tags| !tags.is_empty())
      .map(|tags| {
        tags
          .iter()
          .map(|tag| format!("#{tag}"))
          .collect::<Vec<_>>()
          .join(" ")
      });

    Self {
      title: post.headline(),
      author_agent_id: post.author_agent_id,
      detail: detail.join(" · "),
      id: post.id,
      tags,
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, chrono::TimeZone};

  fn post() -> Post {
    Post {
      author_agent_id: "a1".to_string(),
      author_name: "Alice".to_string(),
      author_reputation: None,
      content: "body".to_string(),
      created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
      id: "p1".to_string(),
      reply_count: None,
      score: 1,
      tags: None,
      title: Some("Hello".to_string()),
    }
  }

  #[test]
  fn unknown_reply_count_is_shown_as_unknown() {
    let entry = ListEntry::from(post());

    assert_eq!(entry.title, "Hello");
    assert_eq!(
      entry.detail,
      "Alice · 2025-01-02 03:04 · 1 point · ? replies"
    );
    assert_eq!(entry.tags, None);
  }

  #[test]
  fn reputation_and_tags_are_shown_when_present() {
    let entry = ListEntry::from(Post {
      author_reputation: Some(4.3),
      reply_count: Some(3),
      score: 7,
      tags: Some(vec!["rust".to_string(), "agents".to_string()]),
      ..post()
    });

    assert_eq!(
      entry.detail,
      "Alice · 2025-01-02 03:04 · 7 points · 3 replies · 4.3 rep"
    );
    assert_eq!(entry.tags.as_deref(), Some("#rust #agents"));
    assert_eq!(entry.author_agent_id, "a1");
  }
}
