use anyhow::Result;
use clap::{Parser, Subcommand};
use grit::areas::repository::Repository;
use grit::errors::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "grit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A read-only git object store reader",
    long_about = "This is a small reader for git repositories, written in Rust. \
    It decodes loose objects, resolves refs and abbreviated hashes, \
    and checks out trees into fresh directories.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Log debug output to stderr")]
    verbose: bool,
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
        long_about = "This command prints the raw payload of an object in the repository. \
        The object may be named by a full or abbreviated hash, a branch, a tag or HEAD."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object to print")]
        object: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists the leaves of a tree, or of the tree of a commit."
    )]
    LsTree {
        #[arg(short = 'r', help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1, help = "The tree or commit to list")]
        object: String,
    },
    #[command(
        name = "hash-object",
        about = "Compute the object ID of a file",
        long_about = "This command computes the blob object ID of a file. \
        Writing the object to the database is not supported yet."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "rev-parse",
        about = "Expand a revision name to a full object ID",
        long_about = "This command resolves a branch, tag, HEAD or abbreviated hash to the object ID it names."
    )]
    RevParse {
        #[arg(index = 1, help = "The revision to resolve")]
        name: String,
    },
    #[command(
        name = "show-ref",
        about = "List references",
        long_about = "This command lists every branch and tag with the object each resolves to."
    )]
    ShowRef {
        #[arg(long, help = "Include HEAD in the listing")]
        head: bool,
    },
    #[command(
        name = "checkout",
        about = "Check out a commit or tree into a new directory",
        long_about = "This command writes the tree of a commit (or a tree itself) into a directory \
        that must not exist yet."
    )]
    Checkout {
        #[arg(index = 1, help = "The commit or tree to check out")]
        revision: String,
        #[arg(index = 2, help = "The directory to create")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let env_filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let pwd = std::env::current_dir()?;
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Commands::Init { path } => {
            let path = path.as_deref().map_or_else(|| pwd.clone(), |path| pwd.join(path));
            Repository::init(&path, &mut stdout)?;
        }
        Commands::CatFile { object } => {
            Repository::discover(&pwd)?.cat_file(object, &mut stdout)?;
        }
        Commands::LsTree { recursive, object } => {
            Repository::discover(&pwd)?.ls_tree(object, *recursive, &mut stdout)?;
        }
        Commands::HashObject { write, file } => {
            Repository::discover(&pwd)?.hash_object(&pwd.join(file), *write, &mut stdout)?;
        }
        Commands::RevParse { name } => {
            Repository::discover(&pwd)?.rev_parse(name, &mut stdout)?;
        }
        Commands::ShowRef { head } => {
            Repository::discover(&pwd)?.show_ref(*head, &mut stdout)?;
        }
        Commands::Checkout { revision, path } => {
            Repository::discover(&pwd)?.checkout_revision(revision, &pwd.join(path), &mut stdout)?;
        }
    }

    Ok(())
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<Error>() {
        Some(Error::AlreadyExists(path)) => {
            eprintln!("fatal: a repository already exists in {}", display_parent(path));
        }
        Some(Error::MultipleResults { name, candidates }) => {
            eprintln!("error: short object ID {name} is ambiguous");
            eprintln!("hint: The candidates are:");

            let repository = std::env::current_dir()
                .ok()
                .and_then(|pwd| Repository::find(&pwd).ok().flatten());
            for candidate in candidates {
                let kind = repository
                    .as_ref()
                    .and_then(|repository| repository.database().read_kind(candidate).ok())
                    .map_or_else(|| "unknown".to_string(), |kind| kind.to_string());
                eprintln!("hint:   {} {}", candidate.to_short_oid(), kind);
            }
            eprintln!("fatal: ambiguous argument '{name}': please specify further");
        }
        _ => eprintln!("fatal: {err:#}"),
    }
}

fn display_parent(git_path: &Path) -> String {
    git_path
        .parent()
        .unwrap_or(git_path)
        .display()
        .to_string()
}
