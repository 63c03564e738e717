use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::config::LOG_ENV;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A minimal content-addressed version control core",
    long_about = "Snapshots a working directory into compressed, hash-addressed blobs, \
    trees and commits, tracks files in a binary index and links commits \
    into a parent-pointer history.",
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
    #[command(name = "init", about = "Initialize a new store in the current directory")]
    Init,
    #[command(
        name = "snap",
        about = "Snapshot the working directory",
        long_about = "Stores every tracked file as a blob and rebuilds the index from scratch."
    )]
    Snap,
    #[command(name = "ls-files", about = "List index content")]
    LsFiles,
    #[command(
        name = "hash-object",
        about = "Store a file as a blob and print its address"
    )]
    HashObject {
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the content of a stored object")]
    CatFile {
        #[arg(short = 't', long = "type", help = "Print only the object kind")]
        show_type: bool,
        #[arg(index = 1, help = "The object address")]
        object: String,
    },
    #[command(
        name = "update-index",
        about = "Rebuild the index from the working directory without storing blobs"
    )]
    UpdateIndex,
    #[command(
        name = "write-tree",
        about = "Build tree objects from the index and print the root address"
    )]
    WriteTree,
    #[command(name = "commit-tree", about = "Create a commit object for a tree")]
    CommitTree {
        #[arg(index = 1, help = "The root tree address")]
        tree: String,
        #[arg(short, long, help = "The parent commit address")]
        parent: Option<String>,
        #[arg(short, long, default_value = "", help = "The commit message")]
        message: String,
    },
    #[command(name = "update-ref", about = "Point HEAD at a commit")]
    UpdateRef {
        #[arg(index = 1, help = "The commit address")]
        commit: String,
    },
    #[command(
        name = "commit",
        about = "Commit the current index and advance HEAD",
        long_about = "Builds trees from the index, creates a commit whose parent is the \
        latest commit (if any) and points HEAD at it."
    )]
    Commit {
        #[arg(short, long, default_value = "", help = "The commit message")]
        message: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "fatal:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let pwd = std::env::current_dir()?;
    let stdout = Box::new(std::io::stdout());

    let mut repository = match &cli.command {
        Commands::Init => Repository::new(&pwd, stdout)?,
        _ => Repository::discover(&pwd, stdout)?,
    };

    match cli.command {
        Commands::Init => repository.init()?,
        Commands::Snap => repository.snap()?,
        Commands::LsFiles => repository.ls_files()?,
        Commands::HashObject { file } => {
            repository.hash_object(&pwd.join(file))?;
        }
        Commands::CatFile { show_type, object } => repository.cat_file(&object, show_type)?,
        Commands::UpdateIndex => repository.update_index()?,
        Commands::WriteTree => {
            repository.write_tree()?;
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => {
            repository.commit_tree(&tree, parent.as_deref(), &message)?;
        }
        Commands::UpdateRef { commit } => repository.update_ref(&commit)?,
        Commands::Commit { message } => {
            repository.commit(&message)?;
        }
    }

    repository.writer().flush()?;

    Ok(())
}
