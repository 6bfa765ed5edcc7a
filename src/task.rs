//! To-do tasks, as exchanged with the remote task collection

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// The identifier of a task.
///
/// It is assigned by the remote collection, and is opaque to this crate.
/// Collections may use JSON numbers or JSON strings, and a `TaskId` is always serialized back the way it has been received.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskId {
    content: IdContent,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum IdContent {
    Number(i64),
    Text(String),
}

impl TaskId {
    /// The numeric value of this ID, in case the collection uses numbers
    pub fn as_number(&self) -> Option<i64> {
        match &self.content {
            IdContent::Number(n) => Some(*n),
            IdContent::Text(_) => None,
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        Self { content: IdContent::Number(n) }
    }
}
impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self { content: IdContent::Text(s.to_string()) }
    }
}
impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self { content: IdContent::Text(s) }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match &self.content {
            IdContent::Number(n) => write!(f, "{}", n),
            IdContent::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.content {
            IdContent::Number(n) => serializer.serialize_i64(*n),
            IdContent::Text(s) => serializer.serialize_str(s),
        }
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => TaskId::from(n),
            RawId::Text(s) => TaskId::from(s),
        })
    }
}



/// The column a task belongs to.
///
/// This is the canonical schema of this crate. Some older front-ends used a `completed: boolean` field instead.
/// That legacy schema is not supported: such a field is kept untouched in [`Task::extra_fields`], but it is never interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Done,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        *self == TaskStatus::Done
    }

    /// The other status
    pub fn opposite(&self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            TaskStatus::Todo => write!(f, "todo"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

/// An empty (or null) status is what collections store for tasks created without one. These are to-do tasks.
impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D>(deserializer: D) -> Result<TaskStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        match raw.as_str() {
            "" | "todo" => Ok(TaskStatus::Todo),
            "done" => Ok(TaskStatus::Done),
            other => Err(serde::de::Error::unknown_variant(other, &["todo", "done"])),
        }
    }
}



/// (De)serializes optional dates the way task collections expect them: `YYYY-MM-DD`, or an empty string when there is no date
pub(crate) mod optional_date {
    use chrono::{DateTime, NaiveDate};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format(FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse(text).map(Some).map_err(D::Error::custom),
        }
    }

    /// Parse a calendar date. Full RFC3339 timestamps are accepted as well, and truncated to their date
    pub fn parse(text: &str) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(text, FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.naive_local().date()))
            .map_err(|_| format!("invalid date {:?} (expected YYYY-MM-DD)", text))
    }
}

pub use optional_date::parse as parse_date;



/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Assigned by the remote collection
    id: TaskId,

    /// The display text of the task
    #[serde(default)]
    text: String,

    #[serde(default)]
    status: TaskStatus,

    #[serde(default, with = "optional_date")]
    start_date: Option<NaiveDate>,
    #[serde(default, with = "optional_date")]
    end_date: Option<NaiveDate>,

    /// Fields that are not used by this crate.
    /// Updates overwrite the whole record on the collection, so they must be sent back as they were received.
    #[serde(flatten)]
    extra_fields: Map<String, Value>,
}

impl Task {
    /// Create a Task instance. Tasks are usually created by the remote collection, see [`NewTask`] to request one.
    pub fn new_with_parameters(id: TaskId, text: String, status: TaskStatus,
                               start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self
    {
        Self {
            id,
            text,
            status,
            start_date,
            end_date,
            extra_fields: Map::new(),
        }
    }

    pub fn id(&self) -> &TaskId                   { &self.id         }
    pub fn text(&self) -> &str                    { &self.text       }
    pub fn status(&self) -> TaskStatus            { self.status      }
    pub fn completed(&self) -> bool               { self.status.is_done() }
    pub fn start_date(&self) -> Option<NaiveDate> { self.start_date  }
    pub fn end_date(&self) -> Option<NaiveDate>   { self.end_date    }
    pub fn extra_fields(&self) -> &Map<String, Value> { &self.extra_fields }

    /// Whether the end date has passed while this task is still to do
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.end_date {
            Some(end) => end < today && self.status != TaskStatus::Done,
            None => false,
        }
    }

    pub fn set_id(&mut self, id: TaskId) {
        self.id = id;
    }

    pub fn set_text(&mut self, new_text: String) {
        self.text = new_text;
    }

    pub fn set_status(&mut self, new_status: TaskStatus) {
        self.status = new_status;
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.start_date = date;
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.end_date = date;
    }

    /// Move this task to another column.
    ///
    /// A task that becomes done without an end date gets `today` as its end date.
    /// Moving back to `todo` never changes any date.
    pub fn move_to(&mut self, new_status: TaskStatus, today: NaiveDate) {
        if new_status == TaskStatus::Done && self.end_date.is_none() {
            self.end_date = Some(today);
        }
        self.status = new_status;
    }
}



/// A task that the user would like to create
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewTask {
    text: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new<S: ToString>(text: S) -> Self {
        Self { text: text.to_string(), ..Self::default() }
    }

    pub fn with_start_date(mut self, date: Option<NaiveDate>) -> Self {
        self.start_date = date;
        self
    }

    pub fn with_end_date(mut self, date: Option<NaiveDate>) -> Self {
        self.end_date = date;
        self
    }

    pub fn text(&self) -> &str { &self.text }

    /// Check this draft, and build the body of the creation request.
    ///
    /// The text is trimmed and must not be empty. A missing start date defaults to `today`.
    /// The (possibly defaulted) start date must not be after the end date, if any.
    pub fn validate(&self, today: NaiveDate) -> Result<TaskDraft, ValidationError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let start = self.start_date.unwrap_or(today);
        if let Some(end) = self.end_date {
            if start > end {
                return Err(ValidationError::InvalidDateRange { start, end });
            }
        }

        Ok(TaskDraft {
            text: text.to_string(),
            start_date: start,
            end_date: self.end_date,
            status: TaskStatus::Todo,
        })
    }
}

/// The body of a creation request: a validated [`NewTask`], that has no ID yet
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    text: String,
    start_date: NaiveDate,
    #[serde(with = "optional_date")]
    end_date: Option<NaiveDate>,
    status: TaskStatus,
}

impl TaskDraft {
    pub fn text(&self) -> &str                  { &self.text       }
    pub fn start_date(&self) -> NaiveDate       { self.start_date  }
    pub fn end_date(&self) -> Option<NaiveDate> { self.end_date    }
    pub fn status(&self) -> TaskStatus          { self.status      }
}
