use crate::error::{Result, TaskError};
use crate::task::{validate_due_date, Task, TaskBuilder};
use chrono::NaiveDate;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Completed,
    Pending,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }

    /// Heading word used when listing, e.g. "Pending".
    pub fn title(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
        }
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.is_completed(),
            Self::Pending => !task.is_completed(),
        }
    }
}

impl FromStr for Filter {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            _ => Err(TaskError::InvalidFilter(s.to_string())),
        }
    }
}

/// Ordered, in-memory collection of tasks. Insertion order is display order.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Appends a task. `due_date` is raw `YYYY-MM-DD` text, empty for none, and
    /// must not be before `today`. Nothing is added on error.
    /// Duplicate descriptions are allowed.
    pub fn add_task(
        &mut self,
        description: impl Into<String>,
        due_date: &str,
        today: NaiveDate,
    ) -> Result<&Task> {
        let mut builder = TaskBuilder::new().description(description);
        if validate_due_date(due_date, today)?.is_some() {
            builder = builder.due_date(due_date);
        }
        let task = builder.build()?;
        tracing::debug!(
            task = %task,
            created_at = %task.created_at(),
            due = ?task.due_date(),
            "task added"
        );
        let index = self.tasks.len();
        self.tasks.push(task);
        Ok(&self.tasks[index])
    }

    pub fn pending(&self) -> Vec<&Task> {
        self.view(Filter::Pending)
    }

    /// Completes the first pending task whose description matches exactly.
    /// Later tasks with the same description are left alone.
    pub fn mark_completed(&mut self, description: &str) -> Result<&Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| !t.is_completed() && t.description() == description)
            .ok_or_else(|| TaskError::TaskNotFound(description.to_string()))?;
        task.mark_completed();
        tracing::debug!(description, "task marked completed");
        Ok(&*task)
    }

    /// Removes every task whose description matches exactly and returns how many went.
    pub fn delete_task(&mut self, description: &str) -> Result<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.description() != description);
        let removed = before - self.tasks.len();
        if removed == 0 {
            return Err(TaskError::TaskNotFound(description.to_string()));
        }
        tracing::debug!(description, removed, "tasks deleted");
        Ok(removed)
    }

    pub fn view(&self, filter: Filter) -> Vec<&Task> {
        self.iter().filter(|t| filter.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
    }

    fn descriptions(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.description().to_string()).collect()
    }

    #[test]
    fn test_add_task_grows_list() {
        let mut list = TaskList::new();
        assert!(list.is_empty());
        let rendered = list.add_task("Buy milk", "", today()).unwrap().to_string();
        assert_eq!(rendered, "Buy milk - Pending");
        list.add_task("Buy milk", "2031-03-04", today()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.iter().nth(1).unwrap().due_date(),
            NaiveDate::from_ymd_opt(2031, 3, 4)
        );
    }

    #[test]
    fn test_add_task_accepts_today() {
        let mut list = TaskList::new();
        let task = list.add_task("Today thing", "2030-06-15", today()).unwrap();
        assert_eq!(task.to_string(), "Today thing - Pending, Due: 2030-06-15");
    }

    #[test]
    fn test_add_task_rejects_bad_dates() {
        let mut list = TaskList::new();
        assert!(matches!(
            list.add_task("Buy milk", "2030-06-14", today()),
            Err(TaskError::PastDueDate { .. })
        ));
        assert!(matches!(
            list.add_task("Buy milk", "15/06/2030", today()),
            Err(TaskError::InvalidDateFormat(_))
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn test_mark_completed_first_pending_match_only() {
        let mut list = TaskList::new();
        list.add_task("Call bank", "", today()).unwrap();
        list.add_task("Call bank", "", today()).unwrap();

        let done = list.mark_completed("Call bank").unwrap();
        assert!(done.is_completed());
        assert_eq!(list.pending().len(), 1);
        assert!(list.iter().next().unwrap().is_completed());

        list.mark_completed("Call bank").unwrap();
        assert!(list.pending().is_empty());
        assert!(matches!(
            list.mark_completed("Call bank"),
            Err(TaskError::TaskNotFound(_))
        ));
    }

    #[test]
    fn test_mark_completed_requires_exact_match() {
        let mut list = TaskList::new();
        list.add_task("Buy milk", "", today()).unwrap();
        assert!(list.mark_completed("buy milk").is_err());
        assert!(list.mark_completed("Buy milk ").is_err());
        assert_eq!(list.pending().len(), 1);
    }

    #[test]
    fn test_delete_removes_all_matches() {
        let mut list = TaskList::new();
        list.add_task("Call bank", "", today()).unwrap();
        list.add_task("Buy milk", "", today()).unwrap();
        list.add_task("Call bank", "", today()).unwrap();

        assert_eq!(list.delete_task("Call bank").unwrap(), 2);
        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().next().unwrap().description(), "Buy milk");
    }

    #[test]
    fn test_delete_missing_leaves_list_untouched() {
        let mut list = TaskList::new();
        list.add_task("Buy milk", "", today()).unwrap();
        assert!(matches!(list.delete_task("Sell milk"), Err(TaskError::TaskNotFound(_))));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_view_filters_preserve_order() {
        let mut list = TaskList::new();
        for name in ["a", "b", "c", "d"] {
            list.add_task(name, "", today()).unwrap();
        }
        list.mark_completed("b").unwrap();
        list.mark_completed("d").unwrap();

        assert_eq!(descriptions(&list.view(Filter::All)), ["a", "b", "c", "d"]);
        assert_eq!(descriptions(&list.view(Filter::Pending)), ["a", "c"]);
        assert_eq!(descriptions(&list.view(Filter::Completed)), ["b", "d"]);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("completed".parse::<Filter>().unwrap(), Filter::Completed);
        assert_eq!("pending".parse::<Filter>().unwrap(), Filter::Pending);
        assert!(matches!("bogus".parse::<Filter>(), Err(TaskError::InvalidFilter(s)) if s == "bogus"));
        assert!("All".parse::<Filter>().is_err());
        assert_eq!(Filter::Pending.title(), "Pending");
        assert_eq!(Filter::Completed.as_str(), "completed");
    }
}
