use anyhow::Result;
use clap::{Parser, Subcommand};
use pit::areas::repository::Repository;
use pit::artifacts::transport::http::HttpTransport;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PIT_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
    name = "pit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small git object store and clone client",
    long_about = "A simple implementation of git's object model, written in Rust. \
    It stores loose objects, snapshots directories into trees \
    and clones repositories over the smart HTTP protocol.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
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
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        Trees are printed one entry per line."
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
        file: String,
    },
    #[command(
        name = "write-tree",
        about = "Snapshot the working directory into tree objects",
        long_about = "This command stores every file below the repository root as a blob \
        and every non-empty directory as a tree, then prints the root tree SHA."
    )]
    WriteTree,
    #[command(name = "ls-tree", about = "List the entries of a tree object")]
    LsTree {
        #[arg(long, help = "Only print entry names")]
        name_only: bool,
        #[arg(index = 1, help = "The tree SHA to list")]
        sha: String,
    },
    #[command(
        name = "commit-tree",
        about = "Create a commit object for a tree",
        long_about = "This command creates a commit object pointing at the given tree. \
        The identity is read from GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL and GIT_AUTHOR_DATE."
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree SHA")]
        tree: String,
        #[arg(short, long = "parent", help = "A parent commit SHA")]
        parents: Vec<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "clone",
        about = "Clone a repository over smart HTTP",
        long_about = "This command fetches the first ref advertised by the remote \
        and unpacks its objects into a new repository."
    )]
    Clone {
        #[arg(index = 1, help = "The URL of the remote repository")]
        url: String,
        #[arg(index = 2, help = "The directory to clone into")]
        dir: PathBuf,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn open_repository(path: &Path) -> Result<Repository> {
    Repository::new(path, Box::new(std::io::stdout()))
}

fn open_current_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    open_repository(&pwd)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => open_repository(path)?,
                None => open_current_repository()?,
            };

            repository.init()?
        }
        Commands::CatFile { sha } => open_current_repository()?.cat_file(sha)?,
        Commands::HashObject { write, file } => {
            open_current_repository()?.hash_object(file, *write)?
        }
        Commands::WriteTree => open_current_repository()?.write_tree()?,
        Commands::LsTree { name_only, sha } => {
            open_current_repository()?.ls_tree(sha, *name_only)?
        }
        Commands::CommitTree {
            tree,
            parents,
            message,
        } => open_current_repository()?.commit_tree(tree, parents, message)?,
        Commands::Clone { url, dir } => {
            let transport = HttpTransport::new(url)?;
            let mut repository = open_repository(dir)?;

            repository.clone_repository(&transport).await?
        }
    }

    Ok(())
}
