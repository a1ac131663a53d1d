use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Comment {
  #[serde(deserialize_with = "deserialize_id")]
  pub(crate) author_agent_id: String,
  pub(crate) author_name: String,
  pub(crate) content: String,
  #[serde(deserialize_with = "deserialize_timestamp")]
  pub(crate) created_at: DateTime<Utc>,
  #[serde(deserialize_with = "deserialize_id")]
  pub(crate) id: String,
  #[serde(default, deserialize_with = "deserialize_optional_id")]
  pub(crate) parent_comment_id: Option<String>,
  #[serde(deserialize_with = "deserialize_id")]
  pub(crate) post_id: String,
  pub(crate) score: i64,
}
