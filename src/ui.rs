use crate::config::{Config, ViewFormat};
use crate::error::{Result, TaskError};
use crate::task_list::{Filter, TaskList};
use chrono::Local;
use crossterm::style::{style, Stylize};
use std::io::{BufRead, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddTask,
    MarkCompleted,
    DeleteTask,
    ViewTasks,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" => Ok(Self::AddTask),
            "2" => Ok(Self::MarkCompleted),
            "3" => Ok(Self::DeleteTask),
            "4" => Ok(Self::ViewTasks),
            "5" => Ok(Self::Exit),
            _ => Err(TaskError::InvalidMenuChoice(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Plain,
    Success,
    Warning,
    Heading,
}

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented menu loop. Reads choices from `input` and writes prompts and results to `output`.
pub struct Console<R, W> {
    input: R,
    output: W,
    config: Config,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the user picks Exit or input runs out.
    pub fn run(&mut self, list: &mut TaskList) -> Result<()> {
        loop {
            self.display_menu()?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(());
            };
            let flow = match choice.parse::<MenuChoice>() {
                Ok(MenuChoice::AddTask) => self.add_task(list)?,
                Ok(MenuChoice::MarkCompleted) => self.mark_completed(list)?,
                Ok(MenuChoice::DeleteTask) => self.delete_task(list)?,
                Ok(MenuChoice::ViewTasks) => self.view_tasks(list)?,
                Ok(MenuChoice::Exit) => {
                    self.say("Exiting program. Goodbye!", Tone::Plain)?;
                    Flow::Quit
                }
                Err(err) => {
                    tracing::warn!(%err, "rejected menu input");
                    self.say("Invalid choice. Please enter a valid option.", Tone::Warning)?;
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                return Ok(());
            }
        }
    }

    fn display_menu(&mut self) -> Result<()> {
        self.say("======= To-Do List Manager Menu =======", Tone::Heading)?;
        for line in [
            "1. Add Task",
            "2. Mark Task as Completed",
            "3. Delete Task",
            "4. View Tasks",
            "5. Exit",
        ] {
            self.say(line, Tone::Plain)?;
        }
        Ok(())
    }

    fn add_task(&mut self, list: &mut TaskList) -> Result<Flow> {
        let Some(description) = self.prompt("Enter task description: ")? else {
            return Ok(Flow::Quit);
        };
        loop {
            let Some(text) = self.prompt("Enter due date (YYYY-MM-DD), press Enter if none: ")?
            else {
                return Ok(Flow::Quit);
            };
            match list.add_task(description.as_str(), &text, Local::now().date_naive()) {
                Ok(_) => break,
                Err(err @ TaskError::PastDueDate { .. }) => {
                    tracing::warn!(%err, "rejected due date");
                    self.say(
                        "Due date cannot be in the past. Please enter a future date or today's date.",
                        Tone::Warning,
                    )?;
                }
                Err(err @ TaskError::InvalidDateFormat(_)) => {
                    tracing::warn!(%err, "rejected due date");
                    self.say(
                        "Invalid date format. Please enter the date in YYYY-MM-DD format.",
                        Tone::Warning,
                    )?;
                }
                Err(err) => return Err(err),
            }
        }
        self.say("Task added successfully.", Tone::Success)?;
        Ok(Flow::Continue)
    }

    fn mark_completed(&mut self, list: &mut TaskList) -> Result<Flow> {
        let pending: Vec<String> = list.pending().iter().map(|t| t.to_string()).collect();
        if pending.is_empty() {
            self.say("No pending tasks.", Tone::Plain)?;
            return Ok(Flow::Continue);
        }
        self.say("Pending Tasks List:", Tone::Heading)?;
        for line in &pending {
            self.say(line, Tone::Plain)?;
        }

        loop {
            let Some(description) = self.prompt(
                "Enter task description to mark as completed (or type 'exit' to return): ",
            )?
            else {
                return Ok(Flow::Quit);
            };
            if description.eq_ignore_ascii_case("exit") {
                self.say("Exiting mark as completed.", Tone::Plain)?;
                return Ok(Flow::Continue);
            }
            match list.mark_completed(&description) {
                Ok(_) => {
                    self.say("Task marked as completed.", Tone::Success)?;
                    return Ok(Flow::Continue);
                }
                Err(err) => {
                    tracing::warn!(%err, "no pending task to complete");
                    self.say(
                        "Task not found. Please enter a valid task description or type 'exit' to return.",
                        Tone::Warning,
                    )?;
                }
            }
        }
    }

    fn delete_task(&mut self, list: &mut TaskList) -> Result<Flow> {
        let Some(description) = self.prompt("Enter task description to delete: ")? else {
            return Ok(Flow::Quit);
        };
        match list.delete_task(&description) {
            Ok(_) => self.say("Task deleted successfully.", Tone::Success)?,
            Err(_) => self.say("Task not found.", Tone::Warning)?,
        }
        Ok(Flow::Continue)
    }

    fn view_tasks(&mut self, list: &TaskList) -> Result<Flow> {
        let Some(text) = self.prompt("Choose filter (all/completed/pending): ")? else {
            return Ok(Flow::Quit);
        };
        let filter = match text.parse::<Filter>() {
            Ok(filter) => filter,
            Err(err) => {
                tracing::warn!(%err, "rejected filter");
                self.say("Invalid filter option.", Tone::Warning)?;
                return Ok(Flow::Continue);
            }
        };

        let tasks = list.view(filter);
        tracing::debug!(filter = filter.as_str(), shown = tasks.len(), "viewing tasks");
        if tasks.is_empty() {
            self.say("No tasks found based on the selected filter.", Tone::Plain)?;
            return Ok(Flow::Continue);
        }
        if self.config.view_format == ViewFormat::Json {
            let json = serde_json::to_string_pretty(&tasks)?;
            writeln!(self.output, "{json}")?;
            return Ok(Flow::Continue);
        }
        self.say(&format!("======= {} Tasks =======", filter.title()), Tone::Heading)?;
        for task in &tasks {
            self.say(&task.to_string(), Tone::Plain)?;
        }
        Ok(Flow::Continue)
    }

    /// Prints `message` without a newline and reads one line. `None` means input is exhausted.
    /// Bytes that are not UTF-8 become U+FFFD instead of failing the read.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = buf.strip_suffix(b"\n").unwrap_or(&buf);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        Ok(Some(String::from_utf8_lossy(line).into_owned()))
    }

    fn say(&mut self, message: &str, tone: Tone) -> Result<()> {
        if !self.config.color {
            writeln!(self.output, "{message}")?;
            return Ok(());
        }
        match tone {
            Tone::Plain => writeln!(self.output, "{message}")?,
            Tone::Success => writeln!(self.output, "{}", style(message).green())?,
            Tone::Warning => writeln!(self.output, "{}", style(message).yellow())?,
            Tone::Heading => writeln!(self.output, "{}", style(message).cyan().bold())?,
        }
        Ok(())
    }
}
