use std::path::PathBuf;

use crate::cli::commands::{AddArgs, Cli, Commands, PositionArgs};
use crate::cli::output::{format_item_line, item_to_json};
use crate::io::config_io::{config_path, load_config, resolve_data_dir};
use crate::io::logging;
use crate::io::store::{JsonFileStore, MemoryStore, StoreError, TodoStore};
use crate::model::{ItemId, TodoItem};
use crate::ops::{MAX_ITEMS, TodoList};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no item at position {position} (the list has {len})")]
    NoSuchItem { position: usize, len: usize },
    #[error("the list is full ({} items)", MAX_ITEMS)]
    ListFull,
    #[error("nothing to add: the text is blank")]
    BlankText,
    #[error("could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Resolve the data directory for `cli` the same way the panel does
pub fn data_dir_for(cli: &Cli) -> PathBuf {
    let config_file = cli.config.clone().unwrap_or_else(config_path);
    let (config, warning) = load_config(&config_file);
    if let Some(warning) = warning {
        eprintln!("warning: {}; using defaults", warning);
    }
    resolve_data_dir(&config, cli.data_dir.as_deref())
}

pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    let data_dir = data_dir_for(&cli);
    let _log_guard = logging::init(&data_dir);

    let Some(command) = cli.command else {
        return Ok(());
    };
    let store = JsonFileStore::new(&data_dir);
    let entry = match command {
        Commands::List => return cmd_list(&Session::read(&store)?, json),
        Commands::Add(args) => Session::edit(&store, |s| cmd_add(s, args))?,
        Commands::Done(args) => Session::edit(&store, |s| cmd_done(s, args))?,
        Commands::Rm(args) => Session::edit(&store, |s| cmd_rm(s, args))?,
    };
    print_entry(&entry, json)
}

/// An item and its 1-based position, as printed after an edit
type Entry = (usize, TodoItem);

/// The list as the CLI sees it. Unlike the panel, a store that cannot be
/// read or written is an error here, so a damaged file is never replaced.
struct Session {
    list: TodoList,
}

impl Session {
    fn from_items(items: Vec<TodoItem>) -> Self {
        // The list applies its rules against a scratch copy.
        let list = TodoList::open(Box::new(MemoryStore::with_items(items)));
        Session { list }
    }

    fn read(store: &JsonFileStore) -> Result<Self, CliError> {
        Ok(Self::from_items(store.load()?))
    }

    /// Run one edit with the store locked from the read to the write, so a
    /// panel save in between is not overwritten.
    fn edit<T>(
        store: &JsonFileStore,
        f: impl FnOnce(&mut Session) -> Result<T, CliError>,
    ) -> Result<T, CliError> {
        store.update(|items| {
            let mut session = Self::from_items(std::mem::take(items));
            let out = f(&mut session)?;
            *items = session.list.to_vec();
            Ok(out)
        })
    }

    fn id_at(&self, position: usize) -> Result<ItemId, CliError> {
        position
            .checked_sub(1)
            .and_then(|index| self.list.get(index))
            .map(|item| item.id)
            .ok_or(CliError::NoSuchItem {
                position,
                len: self.list.len(),
            })
    }

    fn entry(&self, id: ItemId) -> Option<Entry> {
        let index = self.list.position(id)?;
        Some((index + 1, self.list.find(id)?.clone()))
    }
}

fn print_entry(entry: &Option<Entry>, json: bool) -> Result<(), CliError> {
    let Some((position, item)) = entry else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&item_to_json(*position, item))?);
    } else {
        println!("{}", format_item_line(*position, item));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(session: &Session, json: bool) -> Result<(), CliError> {
    let items = session.list.items().enumerate();
    if json {
        let out: Vec<_> = items.map(|(i, item)| item_to_json(i + 1, item)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (i, item) in items {
            println!("{}", format_item_line(i + 1, item));
        }
    }
    Ok(())
}

fn cmd_add(session: &mut Session, args: AddArgs) -> Result<Option<Entry>, CliError> {
    let text = args.text.join(" ");
    if text.trim().is_empty() {
        return Err(CliError::BlankText);
    }
    if session.list.is_full() {
        return Err(CliError::ListFull);
    }
    let id = session.list.add(&text).ok_or(CliError::ListFull)?;
    tracing::info!(%id, "item added from the command line");
    Ok(session.entry(id))
}

fn cmd_done(session: &mut Session, args: PositionArgs) -> Result<Option<Entry>, CliError> {
    let id = session.id_at(args.position)?;
    session.list.toggle(id);
    tracing::info!(%id, "item toggled from the command line");
    Ok(session.entry(id))
}

fn cmd_rm(session: &mut Session, args: PositionArgs) -> Result<Option<Entry>, CliError> {
    let id = session.id_at(args.position)?;
    let removed = session.entry(id);
    session.list.delete(id);
    tracing::info!(%id, "item deleted from the command line");
    Ok(removed)
}
