use super::*;

pub(crate) fn deserialize_id<'de, D>(
  deserializer: D,
) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  deserialize_optional_id(deserializer)?.ok_or_else(|| {
    de::Error::invalid_type(Unexpected::Unit, &"string or number")
  })
}

pub(crate) fn deserialize_optional_id<'de, D>(
  deserializer: D,
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(Some(s)),
    Some(Value::Number(n)) => Ok(Some(n.to_string())),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"string or number",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"string or number",
    )),
    Some(Value::Object(_)) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"string or number",
    )),
  }
}

pub(crate) fn deserialize_optional_timestamp<'de, D>(
  deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<String>::deserialize(deserializer)? {
    None => Ok(None),
    Some(raw) => parse_timestamp(&raw).map(Some).ok_or_else(|| {
      de::Error::invalid_value(Unexpected::Str(&raw), &"an ISO-8601 timestamp")
    }),
  }
}

pub(crate) fn deserialize_timestamp<'de, D>(
  deserializer: D,
) -> Result<DateTime<Utc>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = String::deserialize(deserializer)?;

  parse_timestamp(&raw).ok_or_else(|| {
    de::Error::invalid_value(Unexpected::Str(&raw), &"an ISO-8601 timestamp")
  })
}

pub(crate) fn format_score(score: i64) -> String {
  match score {
    1 | -1 => format!("{score} point"),
    _ => format!("{score} points"),
  }
}

pub(crate) fn format_timestamp(timestamp: DateTime<Utc>) -> String {
  timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Parses RFC 3339 timestamps, and offset-less ISO-8601 timestamps as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();

  if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
    return Some(timestamp.with_timezone(&Utc));
  }

  NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
    .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
    .ok()
    .map(|naive| naive.and_utc())
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  match text.char_indices().nth(max_chars) {
    None => text.to_string(),
    Some((end, _)) => format!("{}...", text[..end].trim_end()),
  }
}

pub(crate) fn wrap_paragraphs(text: &str, width: usize) -> Vec<String> {
  text
    .lines()
    .flat_map(|line| {
      if line.trim().is_empty() {
        vec![String::new()]
      } else {
        wrap_text(line, width)
      }
    })
    .collect()
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
    let word_width = word.chars().count();

    if current.is_empty() {
      current.push_str(word);
      current_width = word_width;
    } else if current_width + 1 + word_width <= width {
      current.push(' ');
      current.push_str(word);
      current_width += 1 + word_width;
    } else {
      lines.push(current);
      current = word.to_string();
      current_width = word_width;
    }
  }

  if !current.is_empty() {
    lines.push(current);
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
