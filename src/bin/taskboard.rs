//! Task board CLI
//!
//! # Commands
//!
//! - `taskboard list` - Print all three columns
//! - `taskboard add <title>` - Add a task
//! - `taskboard move <id> <status>` - Move a task (pending/working/finished)
//! - `taskboard stats` - Column counts and tasks finished today

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow};
    use benji_survival::board::{NewTask, Priority, TaskBoard, TaskStatus};
    use benji_survival::platform::FileStore;
    use chrono::Utc;
    use clap::{Args, Parser, Subcommand};

    /// Three-column task board
    #[derive(Parser)]
    #[command(name = "taskboard")]
    #[command(about = "Pending / working / finished task board")]
    #[command(version)]
    struct Cli {
        /// Board file
        #[arg(long, short, default_value = "lab-tasks.json", env = "TASKBOARD_FILE")]
        file: PathBuf,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Print all columns
        List,

        /// Add a task
        Add(AddArgs),

        /// Move a task to another column
        Move {
            id: String,
            /// pending, working or finished
            status: String,
        },

        /// Column counts and tasks finished today
        Stats,
    }

    #[derive(Args)]
    struct AddArgs {
        title: String,

        #[arg(long, short, default_value = "")]
        desc: String,

        /// high, medium or low
        #[arg(long, short, default_value = "medium")]
        priority: String,

        /// Comma separated
        #[arg(long, short, value_delimiter = ',')]
        tags: Vec<String>,

        /// Blocked on a human
        #[arg(long)]
        needs_user: bool,
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        let mut store = FileStore::open(&cli.file)
            .with_context(|| format!("failed to open {}", cli.file.display()))?;
        let mut board = TaskBoard::load(&store);

        match cli.command {
            Commands::List => print_columns(&board),
            Commands::Add(args) => {
                let priority = Priority::from_str(&args.priority)
                    .ok_or_else(|| anyhow!("unknown priority '{}'", args.priority))?;
                let task = board.add_task(
                    NewTask {
                        title: args.title,
                        desc: args.desc,
                        priority,
                        tags: args.tags,
                        needs_user: args.needs_user,
                        status: None,
                    },
                    Utc::now(),
                )?;
                println!("added {} \"{}\"", task.id, task.title);
                board.save(&mut store);
            }
            Commands::Move { id, status } => {
                let status = TaskStatus::from_str(&status)
                    .ok_or_else(|| anyhow!("unknown status '{}'", status))?;
                let task = board.move_task(&id, status, Utc::now())?;
                println!("moved \"{}\" to {}", task.title, status.as_str());
                board.save(&mut store);
            }
            Commands::Stats => {
                let counts = board.counts();
                println!("pending:   {}", counts.pending);
                println!("working:   {}", counts.working);
                println!("finished:  {}", counts.finished);
                println!("done today: {}", board.completed_on(Utc::now().date_naive()));
            }
        }

        store
            .flush()
            .with_context(|| format!("failed to write {}", store.path().display()))
    }

    fn print_columns(board: &TaskBoard) {
        for status in TaskStatus::ALL {
            let column = board.column(status);
            println!("== {} ({}) ==", status.as_str(), column.len());
            for task in column {
                let tags: Vec<String> = task.tags.iter().map(|t| format!("#{t}")).collect();
                let user = if task.needs_user { " [needs user]" } else { "" };
                println!(
                    "  {:>13}  [{}] {}{}  {}",
                    task.id,
                    task.priority.as_str(),
                    task.title,
                    user,
                    tags.join(" ")
                );
                if !task.desc.is_empty() {
                    println!("{:>17}{}", "", task.desc);
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
