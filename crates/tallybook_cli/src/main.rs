//! `tally` command line entry point.
//!
//! # Responsibility
//! - Map each flag 1:1 onto one lifecycle operation or display composition.
//! - Flags are mutually exclusive per invocation; the first recognized flag
//!   wins and the default is the board display plus stats.

mod config;
mod render;

use clap::Parser;
use config::Config;
use log::error;
use render::Renderer;
use tallybook_core::{default_log_level, init_logging, Book, BookResult, JsonStorage, Presenter};

#[derive(Debug, Parser)]
#[command(name = "tally", version, about = "Tasks and notes for the command line")]
struct Cli {
    /// Create one or more tasks (segments separated by `|`)
    #[arg(short = 't', long)]
    task: bool,

    /// Create a note
    #[arg(short = 'n', long)]
    note: bool,

    /// Toggle completion of the given task ids
    #[arg(short = 'c', long)]
    check: bool,

    /// Toggle the star flag of the given item ids
    #[arg(short = 's', long)]
    star: bool,

    /// Archive the given ids and/or every item on the given boards
    #[arg(short = 'd', long)]
    delete: bool,

    /// Restore archived items by id
    #[arg(short = 'r', long)]
    restore: bool,

    /// Display the archive grouped by date
    #[arg(short = 'a', long)]
    archive: bool,

    /// Display active items grouped by date
    #[arg(short = 'i', long)]
    timeline: bool,

    /// Set the priority of one `@id` target (level 1, 2 or 3)
    #[arg(short = 'p', long)]
    priority: bool,

    /// Find items whose description contains every term
    #[arg(short = 'f', long)]
    find: bool,

    /// List items filtered by boards and attribute keywords
    #[arg(short = 'l', long)]
    list: bool,

    /// Replace the description of one `@id` target
    #[arg(short = 'e', long)]
    edit: bool,

    /// Move one `@id` target onto new boards
    #[arg(short = 'm', long = "move")]
    move_boards: bool,

    /// Rename a board: old name, new name
    #[arg(short = 'z', long)]
    rename: bool,

    /// Archive every complete task on the given boards (default: all)
    #[arg(short = 'y', long)]
    clean: bool,

    /// Categorize notes: `@name`, optional `#color`, optional note text
    #[arg(short = 'b', long)]
    category: bool,

    /// Display items created before the given MM/DD/YY date
    #[arg(short = 'x', long)]
    before: bool,

    /// Display items created after the given MM/DD/YY date
    #[arg(short = 'w', long)]
    after: bool,

    /// Export the active collection as JSON to the given path
    #[arg(short = 'q', long)]
    export: bool,

    /// Replace the active collection from a JSON file
    #[arg(short = 'o', long)]
    import: bool,

    /// Operation input tokens
    input: Vec<String>,
}

fn dispatch(cli: &Cli, book: &mut Book<JsonStorage, Renderer>) -> BookResult<()> {
    let input = &cli.input;

    if cli.archive {
        return book.display_archive();
    }
    if cli.task {
        return book.create_task(input);
    }
    if cli.restore {
        return book.restore_items(input);
    }
    if cli.note {
        return book.create_note(input);
    }
    if cli.delete {
        return book.delete_items(input);
    }
    if cli.check {
        return book.check_tasks(input);
    }
    if cli.star {
        return book.star_items(input);
    }
    if cli.priority {
        return book.update_priority(input);
    }
    if cli.timeline {
        book.display_by_date()?;
        return book.display_stats();
    }
    if cli.find {
        return book.find_items(input);
    }
    if cli.list {
        book.list_by_attributes(input)?;
        return book.display_stats();
    }
    if cli.edit {
        return book.edit_description(input);
    }
    if cli.move_boards {
        return book.move_boards(input);
    }
    if cli.clean {
        return book.clean_boards(input);
    }
    if cli.rename {
        return book.rename_board(input);
    }
    if cli.before {
        return book.display_items_before(input);
    }
    if cli.after {
        return book.display_items_after(input);
    }
    if cli.import {
        return book.import_items(input);
    }
    if cli.export {
        return book.export_items(input);
    }

    book.display_by_board()?;
    book.display_stats()
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load();
    let data_dir = config.data_dir();

    if let Err(message) = init_logging(default_log_level(), &data_dir.join("logs")) {
        eprintln!("warning: {message}");
    }

    let renderer = Renderer::new(config);
    let storage = match JsonStorage::new(&data_dir) {
        Ok(storage) => storage,
        Err(err) => {
            error!("event=startup status=error reason={err}");
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let mut book = Book::new(storage, renderer);
    if let Err(err) = dispatch(&cli, &mut book) {
        error!("event=dispatch status=error reason={err}");
        book.presenter().report(&err);
        std::process::exit(1);
    }
}
