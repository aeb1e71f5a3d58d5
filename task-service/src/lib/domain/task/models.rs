use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::models::AccountId;
use crate::domain::errors::ValidationError;
use crate::domain::ownership::OwnedResource;
use crate::task::errors::DescriptionError;
use crate::task::errors::DueDateError;
use crate::task::errors::PriorityError;
use crate::task::errors::StatusError;
use crate::task::errors::TaskIdError;
use crate::task::errors::TitleError;

/// Task entity. `owner` is set once at creation and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub owner: AccountId,
    pub title: TaskTitle,
    pub description: TaskDescription,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(owner: AccountId, command: CreateTaskCommand) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            owner,
            title: command.title,
            description: command.description,
            status: command.status,
            priority: command.priority,
            due_date: command.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the provided fields of `command`, leaving the rest untouched.
    pub fn apply(&mut self, command: UpdateTaskCommand) {
        if let Some(title) = command.title {
            self.title = title;
        }
        if let Some(description) = command.description {
            self.description = description;
        }
        if let Some(status) = command.status {
            self.status = status;
        }
        if let Some(priority) = command.priority {
            self.priority = priority;
        }
        if let Some(due_date) = command.due_date {
            self.due_date = Some(due_date);
        }
        self.updated_at = Utc::now();
    }
}

impl OwnedResource for Task {
    fn owner(&self) -> AccountId {
        self.owner
    }
}

/// Task unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a task ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TaskIdError> {
        Uuid::parse_str(s)
            .map(TaskId)
            .map_err(|e| TaskIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty title of at most 100 characters, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    const MAX_LENGTH: usize = 100;

    pub fn new(title: String) -> Result<Self, TitleError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            Err(TitleError::Missing)
        } else if trimmed.chars().count() > Self::MAX_LENGTH {
            Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form description of at most 500 characters; may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDescription(String);

impl TaskDescription {
    const MAX_LENGTH: usize = 500;

    pub fn new(description: String) -> Result<Self, DescriptionError> {
        let trimmed = description.trim();
        if trimmed.chars().count() > Self::MAX_LENGTH {
            Err(DescriptionError::TooLong {
                max: Self::MAX_LENGTH,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(StatusError),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = PriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(PriorityError),
        }
    }
}

fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, DueDateError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| DueDateError)
}

/// Raw task fields as received, before validation.
#[derive(Debug, Clone, Default)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

/// Command to create a task with validated fields
#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub title: TaskTitle,
    pub description: TaskDescription,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTaskCommand {
    /// Validate creation input; omitted optional fields take their defaults.
    ///
    /// # Errors
    /// * `ValidationError` - One violation per rejected field
    pub fn parse(input: TaskInput) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        let title = errors.check("title", TaskTitle::new(input.title.unwrap_or_default()));
        let description = errors.check(
            "description",
            TaskDescription::new(input.description.unwrap_or_default()),
        );
        let status = errors.check(
            "status",
            input
                .status
                .as_deref()
                .map_or(Ok(TaskStatus::default()), str::parse::<TaskStatus>),
        );
        let priority = errors.check(
            "priority",
            input
                .priority
                .as_deref()
                .map_or(Ok(TaskPriority::default()), str::parse::<TaskPriority>),
        );
        let due_date = errors.check(
            "due_date",
            input.due_date.as_deref().map(parse_due_date).transpose(),
        );

        match (title, description, status, priority, due_date) {
            (Some(title), Some(description), Some(status), Some(priority), Some(due_date))
                if errors.is_empty() =>
            {
                Ok(Self {
                    title,
                    description,
                    status,
                    priority,
                    due_date,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Command to update an existing task with optional validated fields.
///
/// Only provided fields will be updated. There is deliberately no owner field.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskCommand {
    pub title: Option<TaskTitle>,
    pub description: Option<TaskDescription>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTaskCommand {
    pub fn parse(input: TaskInput) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        let title = errors.check("title", input.title.map(TaskTitle::new).transpose());
        let description = errors.check(
            "description",
            input.description.map(TaskDescription::new).transpose(),
        );
        let status = errors.check(
            "status",
            input.status.as_deref().map(str::parse::<TaskStatus>).transpose(),
        );
        let priority = errors.check(
            "priority",
            input.priority.as_deref().map(str::parse::<TaskPriority>).transpose(),
        );
        let due_date = errors.check(
            "due_date",
            input.due_date.as_deref().map(parse_due_date).transpose(),
        );

        match (title, description, status, priority, due_date) {
            (Some(title), Some(description), Some(status), Some(priority), Some(due_date))
                if errors.is_empty() =>
            {
                Ok(Self {
                    title,
                    description,
                    status,
                    priority,
                    due_date,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Optional narrowing for task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    pub fn parse(status: Option<String>, priority: Option<String>) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();
        let status = errors.check("status", status.as_deref().map(str::parse::<TaskStatus>).transpose());
        let priority = errors.check(
            "priority",
            priority.as_deref().map(str::parse::<TaskPriority>).transpose(),
        );

        match (status, priority) {
            (Some(status), Some(priority)) if errors.is_empty() => Ok(Self { status, priority }),
            _ => Err(errors),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |status| task.status == status)
            && self.priority.map_or(true, |priority| task.priority == priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: Some(title.to_string()),
            ..TaskInput::default()
        }
    }

    #[test]
    fn test_create_defaults() {
        let command = CreateTaskCommand::parse(input("  Write report ")).unwrap();

        assert_eq!(command.title.as_str(), "Write report");
        assert_eq!(command.description.as_str(), "");
        assert_eq!(command.status, TaskStatus::Pending);
        assert_eq!(command.priority, TaskPriority::Medium);
        assert_eq!(command.due_date, None);
    }

    #[test]
    fn test_create_reports_every_field() {
        let err = CreateTaskCommand::parse(TaskInput {
            title: None,
            description: Some("x".repeat(501)),
            status: Some("done".to_string()),
            priority: Some("urgent".to_string()),
            due_date: Some("tomorrow".to_string()),
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Please provide a task title, \
             Description cannot exceed 500 characters, \
             Status must be one of: pending, in-progress, completed, \
             Priority must be one of: low, medium, high, \
             Due date must be a valid ISO 8601 date-time"
        );
    }

    #[test]
    fn test_create_parses_due_date() {
        let command = CreateTaskCommand::parse(TaskInput {
            due_date: Some("2026-03-01T09:30:00+02:00".to_string()),
            ..input("Dentist")
        })
        .unwrap();

        assert_eq!(
            command.due_date.map(|d| d.to_rfc3339()),
            Some("2026-03-01T07:30:00+00:00".to_string())
        );
    }

    #[test]
    fn test_update_applies_only_provided_fields() {
        let owner = AccountId::new();
        let mut task = Task::new(owner, CreateTaskCommand::parse(input("Old")).unwrap());
        let created_at = task.created_at;

        let command = UpdateTaskCommand::parse(TaskInput {
            status: Some("completed".to_string()),
            ..TaskInput::default()
        })
        .unwrap();
        task.apply(command);

        assert_eq!(task.title.as_str(), "Old");
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.owner, owner);
        assert_eq!(task.created_at, created_at);
        assert!(task.updated_at >= created_at);
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let err = UpdateTaskCommand::parse(input("   ")).unwrap_err();
        assert_eq!(err.to_string(), "Please provide a task title");
    }

    #[test]
    fn test_filter() {
        let owner = AccountId::new();
        let task = Task::new(owner, CreateTaskCommand::parse(input("A")).unwrap());

        let pending = TaskFilter::parse(Some("pending".to_string()), None).unwrap();
        let high = TaskFilter::parse(None, Some("high".to_string())).unwrap();

        assert!(TaskFilter::default().matches(&task));
        assert!(pending.matches(&task));
        assert!(!high.matches(&task));
        assert!(TaskFilter::parse(Some("nope".to_string()), None).is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
    }
}
