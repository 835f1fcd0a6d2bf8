//! tinygit CLI - Command line interface for the tinygit object store
//!
//! Provides plumbing commands over a repository's loose objects.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tinygit::{ops, ObjectId, ObjectType, Repository};
use tracing::Level;

#[derive(Parser)]
#[command(name = "tinygit")]
#[command(about = "A content-addressed object store speaking git's loose-object format")]
#[command(version)]
struct Cli {
    /// Run as if started in this directory
    #[arg(short = 'C', long = "repo", default_value = ".", global = true)]
    repo: PathBuf,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum KindArg {
    Blob,
    Commit,
    Tree,
    Tag,
}

impl From<KindArg> for ObjectType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Blob => ObjectType::Blob,
            KindArg::Commit => ObjectType::Commit,
            KindArg::Tree => ObjectType::Tree,
            KindArg::Tag => ObjectType::Tag,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty repository
    Init {
        /// Where to create it, relative to --repo
        path: Option<PathBuf>,
    },

    /// Print the payload of an object
    CatFile {
        /// Fail unless the object has this type
        #[arg(short = 't', long = "type")]
        kind: Option<KindArg>,
        /// Full 40-character object id
        object: String,
    },

    /// Compute an object id for a file, optionally storing it
    HashObject {
        /// Object type to hash the file as
        #[arg(short = 't', long = "type", default_value = "blob")]
        kind: KindArg,
        /// Write the object into the object store
        #[arg(short, long)]
        write: bool,
        /// File path, relative to the repository root
        path: PathBuf,
    },

    /// Show commit history
    Log {
        /// Commit to start from
        commit: String,
        /// Maximum number of commits to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => cli.repo.join(path),
                None => cli.repo.clone(),
            };
            let repo = Repository::init(&path)?;
            let gitdir = std::fs::canonicalize(repo.gitdir())?;
            match cli.format {
                OutputFormat::Text => {
                    println!("Initialized empty Git repository in {}", gitdir.display())
                }
                OutputFormat::Json => output(&serde_json::json!({
                    "status": "ok",
                    "gitdir": gitdir.display().to_string()
                }))?,
            }
        }

        Commands::CatFile { kind, object } => {
            let repo = Repository::discover(&cli.repo)?;
            let id = parse_object(&object)?;
            let content = ops::cat_file(&repo, &id, kind.map(ObjectType::from))?;
            match cli.format {
                OutputFormat::Text => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&content)?;
                    stdout.flush()?;
                }
                OutputFormat::Json => output(&serde_json::json!({
                    "id": id,
                    "size": content.len(),
                    "content": String::from_utf8_lossy(&content)
                }))?,
            }
        }

        Commands::HashObject { kind, write, path } => {
            let repo = open_for_hash(&cli.repo, write)?;
            let id = ops::hash_object(&repo, &path, kind.into(), write)?;
            match cli.format {
                OutputFormat::Text => println!("{}", id),
                OutputFormat::Json => output(&serde_json::json!({
                    "id": id,
                    "type": ObjectType::from(kind).as_str(),
                    "written": write
                }))?,
            }
        }

        Commands::Log { commit, limit } => {
            let repo = Repository::discover(&cli.repo)?;
            let start = parse_object(&commit)?;
            match cli.format {
                OutputFormat::Text => {
                    ops::walk(&repo, start, limit, |entry| {
                        println!("{}", entry.line());
                        Ok(())
                    })?;
                }
                OutputFormat::Json => {
                    let entries = ops::log(&repo, start, limit)?;
                    output(&serde_json::json!({
                        "count": entries.len(),
                        "commits": entries
                    }))?;
                }
            }
        }
    }

    Ok(())
}

/// Hashing without `--write` does not need an existing repository
fn open_for_hash(path: &Path, write: bool) -> anyhow::Result<Repository> {
    match Repository::discover(path) {
        Ok(repo) => Ok(repo),
        Err(_) if !write => Ok(Repository::load(path)),
        Err(e) => Err(e.into()),
    }
}

fn parse_object(name: &str) -> anyhow::Result<ObjectId> {
    ObjectId::from_hex(name).map_err(|_| anyhow::anyhow!("Not a valid object name: {}", name))
}

fn output(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
