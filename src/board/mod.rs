//! Three-column task board
//!
//! Tasks move between pending, working and finished. Moving a task to
//! finished stamps its completion time. The whole board is stored as one
//! JSON array under `labTasks`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::{KeyValueStore, load_json, save_json};

pub const STORAGE_KEY: &str = "labTasks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Working,
    Finished,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Pending, TaskStatus::Working, TaskStatus::Finished];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Working => "working",
            TaskStatus::Finished => "finished",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" | "todo" => Some(TaskStatus::Pending),
            "working" | "doing" => Some(TaskStatus::Working),
            "finished" | "done" => Some(TaskStatus::Finished),
            _ => None,
        }
    }

    /// Card label
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Waiting",
            TaskStatus::Working => "In Progress",
            TaskStatus::Finished => "Complete",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" | "h" => Some(Priority::High),
            "medium" | "med" | "m" => Some(Priority::Medium),
            "low" | "l" => Some(Priority::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Blocked on a human
    #[serde(default)]
    pub needs_user: bool,
}

/// Fields supplied when adding a task
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub desc: String,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub needs_user: bool,
    /// Starting column (pending if unset)
    pub status: Option<TaskStatus>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("task title is required")]
    MissingTitle,
    #[error("no task with id {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnCounts {
    pub pending: usize,
    pub working: usize,
    pub finished: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        let tasks: Vec<Task> = load_json(store, STORAGE_KEY).unwrap_or_default();
        log::debug!("Loaded {} tasks", tasks.len());
        Self { tasks }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        save_json(store, STORAGE_KEY, &self.tasks);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Add a task; its id is the creation time in ms (bumped if taken)
    pub fn add_task(&mut self, new: NewTask, now: DateTime<Utc>) -> Result<&Task, BoardError> {
        if new.title.trim().is_empty() {
            return Err(BoardError::MissingTitle);
        }

        let mut id_ms = now.timestamp_millis();
        while self.get(&id_ms.to_string()).is_some() {
            id_ms += 1;
        }

        let status = new.status.unwrap_or(TaskStatus::Pending);
        self.tasks.push(Task {
            id: id_ms.to_string(),
            title: new.title,
            desc: new.desc,
            status,
            priority: new.priority,
            created: Some(now),
            completed: (status == TaskStatus::Finished).then_some(now),
            tags: new.tags,
            needs_user: new.needs_user,
        });
        log::info!("Added task {}", id_ms);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Move a task to another column. Moving to finished stamps `completed`.
    pub fn move_task(
        &mut self,
        id: &str,
        status: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<&Task, BoardError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;

        task.status = status;
        if status == TaskStatus::Finished {
            task.completed = Some(now);
        }
        log::info!("Moved \"{}\" to {}", task.title, status.as_str());
        Ok(task)
    }

    /// Tasks in one column, high priority first (stable within a priority)
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.status == status).collect();
        tasks.sort_by_key(|t| t.priority);
        tasks
    }

    pub fn counts(&self) -> ColumnCounts {
        let mut counts = ColumnCounts::default();
        for task in &self.tasks {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::Working => counts.working += 1,
                TaskStatus::Finished => counts.finished += 1,
            }
        }
        counts
    }

    /// Finished tasks completed on `date` (UTC)
    pub fn completed_on(&self, date: NaiveDate) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Finished)
            .filter(|t| t.completed.is_some_and(|c| c.date_naive() == date))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, h, 0, 0).unwrap()
    }

    #[test]
    fn test_add_requires_title() {
        let mut board = TaskBoard::new();
        assert_eq!(
            board.add_task(NewTask::new("   "), at(9)).unwrap_err(),
            BoardError::MissingTitle
        );
        assert!(board.tasks().is_empty());
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut board = TaskBoard::new();
        let a = board.add_task(NewTask::new("a"), at(9)).unwrap().id.clone();
        let b = board.add_task(NewTask::new("b"), at(9)).unwrap().id.clone();
        assert_ne!(a, b);
        assert_eq!(a, at(9).timestamp_millis().to_string());
        assert_eq!(board.get(&b).unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn test_move_to_finished_stamps_completion() {
        let mut board = TaskBoard::new();
        let id = board.add_task(NewTask::new("ship"), at(9)).unwrap().id.clone();

        let task = board.move_task(&id, TaskStatus::Working, at(10)).unwrap();
        assert_eq!(task.completed, None);

        let task = board.move_task(&id, TaskStatus::Finished, at(11)).unwrap();
        assert_eq!(task.completed, Some(at(11)));
        assert_eq!(board.completed_on(at(0).date_naive()), 1);

        assert_eq!(
            board.move_task("nope", TaskStatus::Working, at(12)).unwrap_err(),
            BoardError::NotFound("nope".to_string())
        );
    }

    #[test]
    fn test_column_sorted_by_priority() {
        let mut board = TaskBoard::new();
        for (title, priority) in [("l", Priority::Low), ("h", Priority::High), ("m", Priority::Medium), ("h2", Priority::High)] {
            board
                .add_task(
                    NewTask {
                        priority,
                        ..NewTask::new(title)
                    },
                    at(9),
                )
                .unwrap();
        }
        let titles: Vec<&str> = board
            .column(TaskStatus::Pending)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["h", "h2", "m", "l"]);
    }

    #[test]
    fn test_counts() {
        let mut board = TaskBoard::new();
        board.add_task(NewTask::new("a"), at(9)).unwrap();
        board
            .add_task(
                NewTask {
                    status: Some(TaskStatus::Working),
                    ..NewTask::new("b")
                },
                at(9),
            )
            .unwrap();
        assert_eq!(
            board.counts(),
            ColumnCounts {
                pending: 1,
                working: 1,
                finished: 0
            }
        );
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut board = TaskBoard::new();
        board
            .add_task(
                NewTask {
                    tags: vec!["dev".to_string()],
                    needs_user: true,
                    ..NewTask::new("review")
                },
                at(9),
            )
            .unwrap();
        board.save(&mut store);

        let json = store.get(STORAGE_KEY).unwrap();
        assert!(json.contains("\"needsUser\":true"));
        assert!(json.contains("\"status\":\"pending\""));
        assert_eq!(TaskBoard::load(&store), board);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(TaskStatus::from_str("Done"), Some(TaskStatus::Finished));
        assert_eq!(TaskStatus::from_str("working"), Some(TaskStatus::Working));
        assert_eq!(TaskStatus::from_str("later"), None);
    }
}
