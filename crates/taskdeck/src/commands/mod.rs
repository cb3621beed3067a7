//! Command dispatch and output.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use taskdeck_app::{AppConfig, CategoryStore, TaskBoard, TaskQueryBuilder, TaskStore};
use taskdeck_core::due::parse_due_date;
use taskdeck_core::{CategoryFilter, NewCategory, NewTask, Task, TaskId, ViewContext};
use time::Date;

use crate::render;
use crate::{CategoryCommand, Command, OutputFormat};

#[derive(Serialize)]
struct ClearedOutput {
    removed: Vec<TaskId>,
    failed: Vec<FailedDelete>,
}

#[derive(Serialize)]
struct FailedDelete {
    id: TaskId,
    error: String,
}

#[allow(clippy::future_not_send, clippy::too_many_lines)]
pub async fn run<T: TaskStore, C: CategoryStore>(
    command: Command,
    board: &mut TaskBoard<T, C>,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<()> {
    let today = board.workspace().clock().today();
    match command {
        Command::List {
            category,
            status,
            search,
        } => {
            let ctx = ViewContext::new()
                .with_category(CategoryFilter::from_param(category.as_deref()))
                .with_status(status.unwrap_or_else(|| config.view.default_status()))
                .with_search(search.unwrap_or_default());
            let view = board.view(&ctx);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
                OutputFormat::Text if view.tasks.is_empty() => {
                    print!("{}", render::empty_state(&board.empty_state(&ctx)));
                    println!("{}", render::stats_line(&view.stats));
                }
                OutputFormat::Text => {
                    print!("{}", render::task_table(&view.tasks, today));
                    println!("{}", render::stats_line(&view.stats));
                }
            }
        }
        Command::Archived { search } => {
            let view = board.archive_view(search.as_deref().unwrap_or_default());
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
                OutputFormat::Text => {
                    println!("{} archived tasks", view.tasks.len());
                    if !view.tasks.is_empty() {
                        print!("{}", render::task_table(&view.tasks, today));
                    }
                }
            }
        }
        Command::Stats => {
            let stats = board.view(&ViewContext::new()).stats;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Text => println!("{}", render::stats_line(&stats)),
            }
        }
        Command::Summary => {
            let summary = board.summary();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                OutputFormat::Text => print!("{}", render::summary(&summary)),
            }
        }
        Command::Categories => {
            let counts = board.category_counts();
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(board.categories())?);
                }
                OutputFormat::Text => {
                    print!("{}", render::category_table(board.categories(), &counts));
                }
            }
        }
        Command::Category { action } => match action {
            CategoryCommand::Add { name, color, icon } => {
                let category = board
                    .create_category(NewCategory { name, color, icon })
                    .await?;
                println!("created category: {} ({})", category.name, category.id);
            }
            CategoryCommand::Rename { id, name } => {
                let category = board.rename_category(&id, name).await?;
                println!("renamed category: {} ({})", category.name, category.id);
            }
            CategoryCommand::Delete { id } => {
                board.delete_category(&id).await?;
                println!("deleted category: {id}");
            }
        },
        Command::Find {
            completed,
            priority,
            category,
            search,
            due_from,
            due_to,
            sort,
        } => {
            let query = TaskQueryBuilder::new()
                .with_completed(completed)
                .with_priority(priority)?
                .with_category(category)
                .with_text(search)
                .with_date_range(due_from, due_to)?
                .build();
            let tasks = board.find(&query, sort);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
                OutputFormat::Text if tasks.is_empty() => {
                    println!("No tasks matched the provided filters");
                }
                OutputFormat::Text => print!("{}", render::task_table(&tasks, today)),
            }
        }
        Command::Show { id } => {
            let task = board.fetch_task(id).await?;
            print_task(&task, format, today)?;
        }
        Command::New {
            title,
            category,
            description,
            priority,
            due,
        } => {
            let form = NewTask {
                title,
                description,
                priority,
                category,
                due_date: parse_due(due.as_deref())?,
            };
            let task = board.create_task(form).await?;
            println!("created task: {} ({})", task.id, task.title);
        }
        Command::Edit {
            id,
            title,
            category,
            description,
            priority,
            due,
            clear_due,
        } => {
            let current = board
                .task(id)
                .cloned()
                .with_context(|| format!("Task not found: {id}"))?;
            let due_date = if clear_due {
                None
            } else {
                parse_due(due.as_deref())?.or(current.due_date)
            };
            let form = NewTask {
                title: title.unwrap_or(current.title),
                description: Some(description.unwrap_or(current.description)),
                priority: Some(priority.unwrap_or(current.priority)),
                category: category.unwrap_or(current.category),
                due_date,
            };
            let task = board.save_task(id, form).await?;
            println!("saved task: {} ({})", task.id, task.title);
        }
        Command::Toggle { id } => {
            let task = board.toggle_complete(id).await?;
            let state = if task.completed { "completed" } else { "pending" };
            println!("task {} is now {state}", task.id);
        }
        Command::Archive { id } => {
            let task = board.archive(id).await?;
            println!("archived task: {} ({})", task.id, task.title);
        }
        Command::Restore { id } => {
            let task = board.restore(id).await?;
            println!("restored task: {} ({})", task.id, task.title);
        }
        Command::Delete { id } => {
            board.delete_task(id).await?;
            println!("deleted task: {id}");
        }
        Command::ClearArchived => {
            let outcome = board.clear_archived().await;
            let failed = outcome.failed.len();
            match format {
                OutputFormat::Json => {
                    let output = ClearedOutput {
                        removed: outcome.removed,
                        failed: outcome
                            .failed
                            .into_iter()
                            .map(|(id, err)| FailedDelete {
                                id,
                                error: err.to_string(),
                            })
                            .collect(),
                    };
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    println!("removed {} archived tasks", outcome.removed.len());
                    for (id, err) in &outcome.failed {
                        println!("failed to delete task {id}: {err}");
                    }
                }
            }
            if failed > 0 {
                bail!("{failed} archived tasks could not be deleted");
            }
        }
    }

    Ok(())
}

fn print_task(task: &Task, format: OutputFormat, today: Date) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(task)?),
        OutputFormat::Text => print!("{}", render::task_detail(task, today)),
    }
    Ok(())
}

fn parse_due(raw: Option<&str>) -> Result<Option<Date>> {
    raw.map(|value| {
        parse_due_date(value).with_context(|| format!("Invalid due date: {value}"))
    })
    .transpose()
}
