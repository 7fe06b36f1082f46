use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use taskdeck::commands::*;
use taskdeck::tui::run_tui;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Simple terminal task manager with categories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Longer description
        #[arg(short, long)]
        desc: Option<String>,
        /// Due date in YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
        /// Category id (defaults to General)
        #[arg(short, long)]
        category: Option<u64>,
    },
    /// List tasks grouped by category
    List {
        /// Show completed tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Toggle a task between pending and complete
    Complete {
        id: u64,
    },
    /// Remove a task
    Remove {
        id: u64,
    },
    /// Edit a task
    Edit {
        id: u64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New description
        #[arg(short, long)]
        desc: Option<String>,
        /// New due date
        #[arg(long)]
        due: Option<String>,
        /// Clear the description
        #[arg(long)]
        clear_desc: bool,
        /// Clear the due date
        #[arg(long)]
        clear_due: bool,
        /// New category id
        #[arg(short, long)]
        category: Option<u64>,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Reset the database (delete all tasks and categories)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Add a new category
    Add {
        /// Category name
        name: String,
    },
    /// List categories
    List,
    /// Remove a category (its tasks move to General)
    Remove {
        id: u64,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { title, desc, due, category }) => cmd_add(title, desc, due, category, false),
        Some(Commands::List { all }) => cmd_list(all),
        Some(Commands::Complete { id }) => cmd_complete(id, false),
        Some(Commands::Remove { id }) => cmd_remove(id, false),
        Some(Commands::Edit { id, title, desc, due, clear_desc, clear_due, category }) => {
            cmd_edit(id, title, desc, due, clear_desc, clear_due, category, false)
        }
        Some(Commands::Category { command }) => match command {
            CategoryCommands::Add { name } => cmd_category_add(name, false),
            CategoryCommands::List => cmd_category_list(),
            CategoryCommands::Remove { id } => cmd_category_remove(id, false),
        },
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "taskdeck", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
