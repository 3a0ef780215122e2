use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;
use tinybit::commands::porcelain::commit::CommitOptions;
use tinybit::commands::porcelain::log::LogOptions;
use tinybit::{EntryOrder, InitOptions, Repository, TreeLayout};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tinybit",
    version,
    about = "A tiny content-addressed version store",
    long_about = "Stores blobs, trees and commits the way git lays them out on disk \
    and keeps a single branch pointing at the newest commit.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
        #[arg(
            short = 'b',
            long = "initial-branch",
            default_value = tinybit::artifacts::core::config::DEFAULT_BRANCH,
            help = "The name of the branch HEAD points to"
        )]
        initial_branch: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists the entries of a tree. Given a commit (or HEAD), it lists the commit's tree."
    )]
    LsTree {
        #[arg(short, long, help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1, default_value = "HEAD")]
        object: String,
    },
    #[command(
        name = "commit",
        about = "Commit files from the working tree onto the current branch",
        long_about = "This command stores the given files (the whole working tree by default) \
        as blobs and trees and records a commit on the branch HEAD points to. \
        The author is read from GIT_AUTHOR_NAME and GIT_AUTHOR_EMAIL."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(long, help = "Store every path as a top-level tree entry")]
        flat: bool,
        #[arg(long, help = "Keep tree entries in the order the paths were found")]
        keep_order: bool,
        #[arg(index = 1)]
        paths: Vec<PathBuf>,
    },
    #[command(name = "log", about = "Show commit history from HEAD")]
    Log {
        #[arg(short = 'n', long = "max-count", help = "Limit the number of commits shown")]
        max_count: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init {
            path,
            initial_branch,
        } => {
            let path = path.clone().unwrap_or(pwd);
            let repository = Repository::new(path, Box::new(std::io::stdout()))?;

            repository.init(&InitOptions::new(initial_branch.clone()))?
        }
        Commands::CatFile { sha } => {
            let repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

            repository.cat_file(sha)?
        }
        Commands::HashObject { write, file } => {
            let repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

            repository.hash_object(file, *write)?
        }
        Commands::LsTree { recursive, object } => {
            let repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

            repository.ls_tree(object, *recursive)?
        }
        Commands::Commit {
            message,
            flat,
            keep_order,
            paths,
        } => {
            let repository = Repository::new(pwd, Box::new(std::io::stdout()))?;
            let opts = CommitOptions {
                message: message.clone(),
                paths: paths.clone(),
                tree_layout: if *flat {
                    TreeLayout::Flat
                } else {
                    TreeLayout::Nested
                },
                entry_order: if *keep_order {
                    EntryOrder::Given
                } else {
                    EntryOrder::Sorted
                },
            };

            repository.commit(&opts)?
        }
        Commands::Log { max_count } => {
            let repository = Repository::new(pwd, Box::new(std::io::stdout()))?;

            repository.log(&LogOptions {
                max_count: *max_count,
            })?
        }
    }

    Ok(())
}
