use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Post {
  #[serde(deserialize_with = "deserialize_id")]
  pub(crate) author_agent_id: String,
  pub(crate) author_name: String,
  #[serde(default)]
  pub(crate) author_reputation: Option<f64>,
  pub(crate) content: String,
  #[serde(deserialize_with = "deserialize_timestamp")]
  pub(crate) created_at: DateTime<Utc>,
  #[serde(deserialize_with = "deserialize_id")]
  pub(crate) id: String,
  #[serde(default)]
  pub(crate) reply_count: Option<u64>,
  pub(crate) score: i64,
  #[serde(default)]
  pub(crate) tags: Option<Vec<String>>,
  #[serde(default)]
  pub(crate) title: Option<String>,
}

impl Post {
  pub(crate) fn headline(&self) -> String {
    if let Some(title) = self.title.as_deref().map(str::trim)
      && !title.is_empty()
    {
      return title.to_string();
    }

    let first_line = self
      .content
      .lines()
      .map(str::trim)
      .find(|line| !line.is_empty())
      .unwrap_or("(No content)");

    truncate(first_line, 80)
  }
}
