use crate::error::{Result, TaskError};
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, Clone)]
pub struct Task {
    description: String,
    completed: bool,
    created_at: DateTime<Local>,
    due_date: Option<NaiveDate>,
}

/// A due date as handed to the constructor: raw user text or an already parsed date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDateInput {
    Text(String),
    Date(NaiveDate),
}

impl From<&str> for DueDateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DueDateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<NaiveDate> for DueDateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl DueDateInput {
    fn resolve(self) -> Result<NaiveDate> {
        match self {
            Self::Text(text) => parse_due_date(&text),
            Self::Date(date) => Ok(date),
        }
    }
}

impl Task {
    pub fn new(
        description: impl Into<String>,
        due_date: Option<impl Into<DueDateInput>>,
    ) -> Result<Self> {
        let due_date = due_date.map(|d| d.into().resolve()).transpose()?;
        Ok(Self {
            description: description.into(),
            completed: false,
            created_at: Local::now(),
            due_date,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.completed { "Completed" } else { "Pending" };
        write!(f, "{} - {}", self.description, status)?;
        if let Some(due) = self.due_date {
            write!(f, ", Due: {}", due.format(DATE_FORMAT))?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct TaskBuilder {
    description: Option<String>,
    due_date: Option<DueDateInput>,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn due_date(mut self, due_date: impl Into<DueDateInput>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn build(self) -> Result<Task> {
        Task::new(self.description.unwrap_or_default(), self.due_date)
    }
}

/// Parses a strict `YYYY-MM-DD` date. Single-digit months or days are rejected.
pub fn parse_due_date(text: &str) -> Result<NaiveDate> {
    let well_formed = text.len() == 10
        && text.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(TaskError::InvalidDateFormat(text.to_string()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| TaskError::InvalidDateFormat(text.to_string()))
}

/// Empty input means no due date. Dates before `today` are rejected; today is fine.
pub fn validate_due_date(text: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
    if text.is_empty() {
        return Ok(None);
    }
    let due = parse_due_date(text)?;
    if due < today {
        return Err(TaskError::PastDueDate { due, today });
    }
    Ok(Some(due))
}
