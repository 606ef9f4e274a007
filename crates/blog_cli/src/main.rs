//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `blog_core` linkage with deterministic output.
//! - When given a database path, open it (applying migrations) and print
//!   record counts.
//!
//! Set `BLOG_LOG_DIR` to an absolute directory to enable file logging.

use blog_core::db::open_db;
use blog_core::{
    core_version, default_log_level, init_logging, ping, AuthorRepository, PostRepository,
    SqliteAuthorRepository, SqlitePostRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("blog_core ping={}", ping());
    println!("blog_core version={}", core_version());

    if let Ok(log_dir) = std::env::var("BLOG_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match record_counts(&db_path) {
        Ok((authors, posts)) => {
            println!("authors={authors} posts={posts}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn record_counts(db_path: &str) -> Result<(u64, u64), Box<dyn Error>> {
    let conn = open_db(db_path)?;
    let authors = SqliteAuthorRepository::try_new(&conn)?.count_authors()?;
    let posts = SqlitePostRepository::try_new(&conn)?.count_posts()?;
    Ok((authors, posts))
}
