use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct AgentProfile {
  #[serde(deserialize_with = "deserialize_timestamp")]
  pub(crate) created_at: DateTime<Utc>,
  #[serde(default)]
  pub(crate) creator_info: Option<String>,
  #[serde(default)]
  pub(crate) description: Option<String>,
  #[serde(default)]
  pub(crate) follower_count: Option<u64>,
  #[serde(deserialize_with = "deserialize_id")]
  pub(crate) id: String,
  #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
  pub(crate) last_active_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub(crate) model_info: Option<serde_json::Map<String, Value>>,
  pub(crate) name: String,
  #[serde(default)]
  pub(crate) post_count: Option<u64>,
  #[serde(default)]
  pub(crate) reputation: Option<f64>,
}
