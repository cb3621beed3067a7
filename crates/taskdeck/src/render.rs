//! Plain-text rendering for the CLI.

use std::collections::BTreeMap;

use taskdeck_core::due::{format_due_date, is_overdue, relative_label};
use taskdeck_core::stats::TaskSummary;
use taskdeck_core::{Category, CategoryId, EmptyState, Task, ViewStats};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

pub fn task_table(tasks: &[Task], today: Date) -> String {
    let mut out = String::new();
    out.push_str("ID | Status | Priority | Title | Category | Due\n");
    out.push_str("-- | ------ | -------- | ----- | -------- | ---\n");
    for task in tasks {
        out.push_str(&format!(
            "{} | {} | {} | {} | {} | {}\n",
            task.id,
            status_label(task),
            task.priority,
            task.title,
            task.category,
            due_cell(task, today)
        ));
    }
    out
}

pub fn stats_line(stats: &ViewStats) -> String {
    format!(
        "{} of {} tasks completed ({:.0}%) | all {} | pending {} | completed {} | high {}",
        stats.completed,
        stats.total,
        stats.percentage,
        stats.counts.all,
        stats.counts.pending,
        stats.counts.completed,
        stats.counts.high
    )
}

pub fn summary(summary: &TaskSummary) -> String {
    let lines = [
        format!("Total:      {}", summary.total),
        format!("Completed:  {}", summary.completed),
        format!("Pending:    {}", summary.pending),
        format!("Overdue:    {}", summary.overdue),
        format!(
            "Priority:   high {} / medium {} / low {}",
            summary.by_priority.high, summary.by_priority.medium, summary.by_priority.low
        ),
        format!("Completion: {}%", summary.completion_rate),
    ];
    lines.iter().map(|line| format!("{line}\n")).collect()
}

pub fn task_detail(task: &Task, today: Date) -> String {
    let mut lines = vec![
        format!("#{} {}", task.id, task.title),
        format!("Status:   {}", status_label(task)),
        format!("Priority: {}", task.priority),
        format!("Category: {}", task.category),
        format!("Due:      {}", due_cell(task, today)),
        format!("Created:  {}", timestamp(task.created_at)),
        format!("Updated:  {}", timestamp(task.updated_at)),
    ];
    if !task.description.is_empty() {
        lines.push(format!("\n{}", task.description));
    }
    lines.iter().map(|line| format!("{line}\n")).collect()
}

pub fn empty_state(state: &EmptyState) -> String {
    format!("{}\n{}\n", state.message, state.description)
}

pub fn category_table(categories: &[Category], counts: &BTreeMap<CategoryId, usize>) -> String {
    let mut out = String::new();
    out.push_str("ID | Name | Tasks\n");
    out.push_str("-- | ---- | -----\n");
    for category in categories {
        let count = counts.get(&category.id).copied().unwrap_or_default();
        out.push_str(&format!("{} | {} | {}\n", category.id, category.name, count));
    }
    out
}

fn status_label(task: &Task) -> &'static str {
    match (task.archived, task.completed) {
        (true, _) => "archived",
        (false, true) => "done",
        (false, false) => "pending",
    }
}

fn due_cell(task: &Task, today: Date) -> String {
    let Some(due) = task.due_date else {
        return "-".to_owned();
    };
    let date = format_due_date(due).unwrap_or_else(|_| due.to_string());
    let label = relative_label(due, today);
    if is_overdue(task.due_date, task.completed, today) {
        format!("{date} ({label}, overdue)")
    } else {
        format!("{date} ({label})")
    }
}

fn timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}
