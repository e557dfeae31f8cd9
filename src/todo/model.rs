use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};
use ulid::Ulid;

/// Identifier of a task.
///
/// New ids are lowercase ULIDs. Numeric ids from older blobs are accepted on
/// load, compared by their decimal form, and written back as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawTaskId")]
pub struct TaskId {
    value: String,
    numeric: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTaskId {
    Text(String),
    Number(u64),
}

impl From<RawTaskId> for TaskId {
    fn from(raw: RawTaskId) -> Self {
        match raw {
            RawTaskId::Text(value) => TaskId::from(value),
            RawTaskId::Number(value) => TaskId {
                value: value.to_string(),
                numeric: true,
            },
        }
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.parse::<u64>() {
            Ok(number) if self.numeric => serializer.serialize_u64(number),
            _ => serializer.serialize_str(&self.value),
        }
    }
}

impl TaskId {
    pub fn generate() -> Self {
        TaskId::from(Ulid::new().to_string().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl PartialEq for TaskId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for TaskId {}

impl Hash for TaskId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for TaskId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TaskId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        TaskId::from(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        TaskId {
            value,
            numeric: false,
        }
    }
}

impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// `createdAt` as written by `Date.prototype.toISOString`: UTC, millisecond
/// precision, `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        DateTime::<Utc>::deserialize(deserializer).map(|value| value.trunc_subsecs(3))
    }
}

/// One to-do item.
///
/// `completed` is the only field that changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
    #[serde(with = "iso_millis")]
    created_at: DateTime<Utc>,
}

impl Task {
    /// Build a pending task. Returns `None` when `text` is blank.
    pub fn new(id: TaskId, text: &str, created_at: DateTime<Utc>) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            id,
            text: text.to_string(),
            completed: false,
            created_at: created_at.trunc_subsecs(3),
        })
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub(crate) fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_blank_text() {
        assert!(Task::new(TaskId::generate(), "   ", Utc::now()).is_none());
        assert!(Task::new(TaskId::generate(), "", Utc::now()).is_none());
    }

    #[test]
    fn new_trims_and_starts_pending() {
        let task = Task::new(TaskId::from("a"), "  buy milk ", Utc::now()).expect("task");
        assert_eq!(task.text(), "buy milk");
        assert!(!task.completed());
    }

    #[test]
    fn serializes_camel_case_record() {
        let created = "2024-05-01T10:00:00Z".parse::<DateTime<Utc>>().expect("ts");
        let task = Task::new(TaskId::from("01hx"), "read", created)
            .expect("task")
            .with_completed(true);
        let json = serde_json::to_value(&task).expect("json");
        assert_eq!(json["id"], "01hx");
        assert_eq!(json["text"], "read");
        assert_eq!(json["completed"], true);
        assert_eq!(json["createdAt"], "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn accepts_numeric_ids() {
        let raw = r#"{"id":1714557600000,"text":"old","completed":false,"createdAt":"2024-05-01T10:00:00.000Z"}"#;
        let task: Task = serde_json::from_str(raw).expect("parse");
        assert_eq!(task.id().as_str(), "1714557600000");
        assert_eq!(task.id(), &TaskId::from("1714557600000"));
        assert_eq!(serde_json::to_string(&task).expect("json"), raw);
    }

    #[test]
    fn timestamps_keep_millisecond_precision() {
        let created = "2024-05-01T10:00:00.123456Z".parse::<DateTime<Utc>>().expect("ts");
        let task = Task::new(TaskId::from("a"), "precise", created).expect("task");
        let json = serde_json::to_string(&task).expect("json");
        assert!(json.contains(r#""createdAt":"2024-05-01T10:00:00.123Z""#));
        let back: Task = serde_json::from_str(&json).expect("parse");
        assert_eq!(back, task);
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = TaskId::generate();
        let b = TaskId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str(), a.as_str().to_ascii_lowercase());
    }
}
