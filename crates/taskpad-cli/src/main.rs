//! Taskpad command-line interface.
//!
//! Thin presentation layer over the coordinators: parses a subcommand,
//! runs exactly one mutation (or a plain listing), and renders the
//! resulting collection and status banner. All business logic lives in
//! `taskpad-app`; this binary only formats output and collects the
//! delete confirmations the coordinators expect from their callers.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use taskpad_app::{Banner, TaskCoordinator};
use taskpad_client::HttpRemoteStore;
use taskpad_core::task::model::{CommentDraft, Task, TaskDraft, TaskPatch};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskpad", about = "Tasks and comments against a remote store", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all tasks with their comments
    List,
    /// Show a single task
    Show { task_id: i64 },
    /// Create a task
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Edit a task's title and/or description
    Edit {
        task_id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Toggle a task's completion flag
    Done { task_id: i64 },
    /// Delete a task and its comments
    Rm {
        task_id: i64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Comment operations
    #[command(subcommand)]
    Comment(CommentCommand),
}

#[derive(Subcommand)]
enum CommentCommand {
    /// Add a comment to a task
    Add { task_id: i64, content: String },
    /// Replace a comment's content
    Edit { comment_id: i64, content: String },
    /// Delete a comment
    Rm {
        comment_id: i64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store = Arc::new(HttpRemoteStore::from_env());
    let coordinator = TaskCoordinator::new(store);

    // Every command starts from a fresh snapshot of the remote collection;
    // toggle and comment commands resolve against it locally.
    if let Err(e) = coordinator.load_tasks().await {
        render_banner(&coordinator).await;
        return Err(e.into());
    }

    let outcome = run(&coordinator, cli.command).await;

    render_banner(&coordinator).await;
    outcome
}

async fn run(coordinator: &TaskCoordinator, command: Command) -> Result<()> {
    match command {
        Command::List => {
            let snapshot = coordinator.snapshot().await;
            if snapshot.is_empty() {
                println!("No tasks.");
            }
            for task in snapshot.tasks() {
                render_task(task);
            }
        }
        Command::Show { task_id } => {
            let snapshot = coordinator.snapshot().await;
            match snapshot.get(task_id) {
                Some(task) => render_task(task),
                None => anyhow::bail!("no task with id {}", task_id),
            }
        }
        Command::Add { title, description } => {
            let draft = TaskDraft {
                title,
                description,
                completed: false,
            };
            let task = coordinator.create_task(draft).await?;
            render_task(&task);
        }
        Command::Edit {
            task_id,
            title,
            description,
        } => {
            let patch = TaskPatch {
                title,
                description,
                completed: None,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to change; pass --title and/or --description");
            }
            let task = coordinator.update_task(task_id, patch).await?;
            render_task(&task);
        }
        Command::Done { task_id } => {
            let task = coordinator.toggle_complete(task_id).await?;
            render_task(&task);
        }
        Command::Rm { task_id, yes } => {
            if !yes && !confirm(&format!("Delete task {} and its comments?", task_id))? {
                println!("Aborted.");
                return Ok(());
            }
            coordinator.delete_task(task_id).await?;
        }
        Command::Comment(CommentCommand::Add { task_id, content }) => {
            let task = coordinator
                .create_comment(task_id, CommentDraft::new(content))
                .await?;
            render_task(&task);
        }
        Command::Comment(CommentCommand::Edit {
            comment_id,
            content,
        }) => {
            let task = coordinator
                .update_comment(comment_id, CommentDraft::new(content))
                .await?;
            render_task(&task);
        }
        Command::Comment(CommentCommand::Rm { comment_id, yes }) => {
            if !yes && !confirm(&format!("Delete comment {}?", comment_id))? {
                println!("Aborted.");
                return Ok(());
            }
            let task = coordinator.delete_comment(comment_id).await?;
            render_task(&task);
        }
    }
    Ok(())
}

fn render_task(task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    match &task.description {
        Some(description) if !description.is_empty() => {
            println!("[{}] #{} {} - {}", mark, task.id, task.title, description)
        }
        _ => println!("[{}] #{} {}", mark, task.id, task.title),
    }
    for comment in &task.comments {
        println!("      #{} {}", comment.id, comment.content);
    }
}

async fn render_banner(coordinator: &TaskCoordinator) {
    match coordinator.status().banner().await {
        Some(Banner::Success(message)) => println!("{}", message),
        Some(Banner::Error(message)) => eprintln!("{}", message),
        None => {}
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
