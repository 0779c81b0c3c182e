use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod book_store;
mod config;
mod content;
mod error;
mod lookup;
mod router;
mod sqlite_persistence;

use book_store::{BookRecord, SqliteBookStore};
use config::{AppConfig, CliConfig, FileConfig};
use lookup::OpenLibraryClient;
use router::{CommandOutcome, LibraryCommand, NewBook, Router};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(about = "Personal book library manager")]
struct CliArgs {
    /// Path to the SQLite library database file.
    #[clap(long, default_value = "library.db", value_parser = parse_path)]
    pub db_path: PathBuf,

    /// Directory where uploaded book files are stored.
    #[clap(long, default_value = "uploads", value_parser = parse_path)]
    pub uploads_dir: PathBuf,

    /// Base URL of the bibliographic search API.
    #[clap(long, default_value = "https://openlibrary.org")]
    pub lookup_url: String,

    /// Timeout in seconds for lookup requests.
    #[clap(long, default_value_t = 10)]
    pub lookup_timeout_sec: u64,

    /// Maximum number of lookup results per query.
    #[clap(long, default_value_t = 3)]
    pub lookup_limit: usize,

    /// Path to a TOML config file; its values override the CLI.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shows library totals and the most recent additions.
    Stats,

    /// Lists every book in the library.
    List,

    /// Lists books whose title or author contains the query.
    Search { query: String },

    /// Searches the external catalog for candidates to add.
    Lookup {
        query: String,

        /// Saves the n-th result (1-based) to the library.
        #[clap(long)]
        save: Option<usize>,
    },

    /// Adds a book to the library.
    Add {
        #[clap(long)]
        title: String,

        #[clap(long)]
        author: String,

        #[clap(long)]
        genre: Option<String>,

        #[clap(long)]
        description: Option<String>,

        /// Year of publication, between 0 and the current year.
        #[clap(long, default_value_t = 0)]
        published_year: i64,

        #[clap(long)]
        isbn: Option<String>,

        /// Cover image URL; a placeholder is generated when omitted.
        #[clap(long)]
        cover_image: Option<String>,

        /// Book file to copy into the uploads directory.
        #[clap(long, value_parser = parse_path)]
        file: Option<PathBuf>,
    },

    /// Removes a book by id.
    Remove { id: String },

    /// Writes a book's content to a file, synthesizing placeholder text
    /// for books without a stored file.
    Download {
        id: String,

        /// Directory to write the download into.
        #[clap(long, default_value = ".", value_parser = parse_path)]
        out_dir: PathBuf,
    },
}

fn to_library_command(command: Command) -> (LibraryCommand, Option<PathBuf>) {
    match command {
        Command::Stats => (LibraryCommand::Stats, None),
        Command::List => (LibraryCommand::List, None),
        Command::Search { query } => (LibraryCommand::Search { query }, None),
        Command::Lookup { query, save } => (LibraryCommand::Lookup { query, save }, None),
        Command::Add {
            title,
            author,
            genre,
            description,
            published_year,
            isbn,
            cover_image,
            file,
        } => (
            LibraryCommand::Add(NewBook {
                title,
                author,
                genre,
                description,
                published_year,
                isbn,
                cover_image,
                file,
            }),
            None,
        ),
        Command::Remove { id } => (LibraryCommand::Remove { id }, None),
        Command::Download { id, out_dir } => (LibraryCommand::Download { id }, Some(out_dir)),
    }
}

fn print_book_line(book: &BookRecord) {
    let mut line = format!(
        "{}  {} by {} ({})",
        book.id, book.title, book.author, book.published_year
    );
    if let Some(genre) = &book.genre {
        line.push_str(&format!(" [{}]", genre));
    }
    println!("{}", line);
}

fn render_outcome(outcome: CommandOutcome, out_dir: Option<PathBuf>) -> Result<()> {
    match outcome {
        CommandOutcome::Overview(stats) => {
            println!("Total books: {}", stats.total_books);
            println!("Total authors: {}", stats.total_authors);
            println!(
                "Most common genre: {}",
                stats.most_common_genre.as_deref().unwrap_or("-")
            );
            if !stats.recent.is_empty() {
                println!();
                println!("Recently added:");
                for book in &stats.recent {
                    print_book_line(book);
                }
            }
        }
        CommandOutcome::BookList(books) => {
            if books.is_empty() {
                println!("No books found.");
            } else {
                for book in &books {
                    print_book_line(book);
                }
            }
        }
        CommandOutcome::Candidates { drafts, note } => {
            if let Some(note) = note {
                eprintln!("{}", note);
            }
            if drafts.is_empty() {
                println!("No books found. Try a different search term.");
            } else {
                for (index, draft) in drafts.iter().enumerate() {
                    println!(
                        "{}. {} by {} ({})",
                        index + 1,
                        draft.title,
                        draft.author,
                        draft.published_year
                    );
                    if let Some(description) = &draft.description {
                        println!("   {}", description);
                    }
                }
            }
        }
        CommandOutcome::Saved(record) => {
            println!("'{}' has been added to your library!", record.title);
            println!("id: {}", record.id);
        }
        CommandOutcome::Info(message) => println!("{}", message),
        CommandOutcome::Content { file_name, content } => {
            let target = out_dir.unwrap_or_else(|| PathBuf::from(".")).join(&file_name);
            std::fs::write(&target, &content.data)
                .with_context(|| format!("Failed to write download to {:?}", target))?;
            println!("Wrote {}", target.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    info!(
        "libreria {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let file_config = cli_args
        .config
        .as_ref()
        .map(|path| FileConfig::load(path))
        .transpose()?;
    let cli_config = CliConfig {
        db_path: cli_args.db_path,
        uploads_dir: cli_args.uploads_dir,
        lookup_url: cli_args.lookup_url,
        lookup_timeout_sec: cli_args.lookup_timeout_sec,
        lookup_limit: cli_args.lookup_limit,
    };
    let config = AppConfig::resolve(&cli_config, file_config);

    let store = SqliteBookStore::new(&config.db_path)?;
    let catalog = OpenLibraryClient::new(
        &config.lookup_url,
        config.lookup_timeout_sec,
        config.lookup_limit,
    )?;
    let router = Router::new(
        Box::new(store),
        Box::new(catalog),
        config.uploads_dir.clone(),
    );

    let (command, out_dir) = to_library_command(cli_args.command);
    let outcome = router.dispatch(command)?;
    render_outcome(outcome, out_dir)
}
