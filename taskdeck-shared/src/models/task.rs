/// Task model and database operations
///
/// Tasks are the core entity of the service. A task optionally belongs to
/// the user that created it and carries closed status and priority
/// vocabularies enforced both at the database (Postgres enums) and at the
/// API boundary (explicit parsing).
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in_progress', 'done');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(100) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'todo',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     due_date TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     user_id BIGINT REFERENCES users(id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{CreateTask, Task, TaskFields};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(
///     &pool,
///     CreateTask {
///         fields: TaskFields {
///             title: "Buy milk".to_string(),
///             ..Default::default()
///         },
///         user_id: None,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::str::FromStr;

/// Error returned when a value does not belong to a closed vocabulary
#[derive(Debug, Clone, thiserror::Error)]
#[error("'{value}' is not a valid {field}")]
pub struct VocabularyError {
    /// Name of the field being parsed
    pub field: &'static str,

    /// The rejected value
    pub value: String,
}

/// Task completion state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been started
    #[default]
    Todo,

    /// Task is being worked on
    InProgress,

    /// Task is finished
    Done,
}

impl TaskStatus {
    /// Converts status to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(VocabularyError {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Task priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low priority
    Low,

    /// Normal priority
    #[default]
    Medium,

    /// High priority
    High,
}

impl TaskPriority {
    /// Converts priority to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(VocabularyError {
                field: "priority",
                value: other.to_string(),
            }),
        }
    }
}

/// Task model representing a tracked task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned by the database
    pub id: i64,

    /// Task title, at most 100 characters
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Completion state
    pub status: TaskStatus,

    /// Priority level
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last mutated
    pub updated_at: DateTime<Utc>,

    /// Owning user (None for unowned tasks)
    pub user_id: Option<i64>,
}

/// The mutable fields of a task
///
/// Used both for creation and for replacement updates. An update overwrites
/// every field here, so optional fields omitted from a request revert to
/// their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFields {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Completion state
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority level
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Field values for the new task
    pub fields: TaskFields,

    /// Owning user, when the creator is authenticated
    pub user_id: Option<i64>,
}

impl Task {
    /// Creates a new task
    ///
    /// The database assigns `id`, `created_at`, and `updated_at`.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, priority, due_date, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, status, priority, due_date,
                      created_at, updated_at, user_id
            "#,
        )
        .bind(data.fields.title)
        .bind(data.fields.description)
        .bind(data.fields.status)
        .bind(data.fields.priority)
        .bind(data.fields.due_date)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, due_date,
                   created_at, updated_at, user_id
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks
    ///
    /// Unordered full scan, no pagination.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, due_date,
                   created_at, updated_at, user_id
            FROM tasks
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks owned by a specific user
    pub async fn list_by_owner(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, due_date,
                   created_at, updated_at, user_id
            FROM tasks
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Replaces every mutable field of a task
    ///
    /// Overwrites `title`, `description`, `status`, `priority`, and
    /// `due_date`, and refreshes `updated_at`. Ownership is not a mutable
    /// field and survives replacement. Returns `None` if the task does not
    /// exist.
    pub async fn replace(
        pool: &PgPool,
        id: i64,
        fields: TaskFields,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                status = $4,
                priority = $5,
                due_date = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, priority, due_date,
                      created_at, updated_at, user_id
            "#,
        )
        .bind(id)
        .bind(fields.title)
        .bind(fields.description)
        .bind(fields.status)
        .bind(fields.priority)
        .bind(fields.due_date)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Returns true if a row was removed, false if the task did not exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(TaskStatus::Todo.as_str(), "todo");
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TaskStatus::Done.as_str(), "done");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!(
            "in_progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
    }

    #[test]
    fn test_status_from_str_rejects_unknown() {
        let err = "doing".parse::<TaskStatus>().unwrap_err();
        assert_eq!(err.field, "status");
        assert_eq!(err.value, "doing");
        assert_eq!(err.to_string(), "'doing' is not a valid status");

        // Vocabulary is exact, not case-insensitive
        assert!("TODO".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_priority_as_str() {
        assert_eq!(TaskPriority::Low.as_str(), "low");
        assert_eq!(TaskPriority::Medium.as_str(), "medium");
        assert_eq!(TaskPriority::High.as_str(), "high");
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("low".parse::<TaskPriority>().unwrap(), TaskPriority::Low);
        assert_eq!(
            "medium".parse::<TaskPriority>().unwrap(),
            TaskPriority::Medium
        );
        assert_eq!("high".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert!("urgent".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);

        let fields = TaskFields::default();
        assert_eq!(fields.status, TaskStatus::Todo);
        assert_eq!(fields.priority, TaskPriority::Medium);
        assert!(fields.description.is_none());
        assert!(fields.due_date.is_none());
    }

    #[test]
    fn test_status_serde_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"done\"").unwrap(),
            TaskStatus::Done
        );
        assert!(serde_json::from_str::<TaskStatus>("\"DONE\"").is_err());
    }
}
