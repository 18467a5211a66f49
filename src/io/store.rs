use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::NamedTempFile;

use crate::io::lock::{LockError, StoreLock};
use crate::model::TodoItem;

/// Fixed storage key: the list lives in `<data dir>/items.json`.
pub const ITEMS_FILE: &str = "items.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize items: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error("store unavailable")]
    Unavailable,
}

/// Persistence collaborator for the todo list. The whole list is written on
/// every save; there is no incremental format.
pub trait TodoStore {
    /// Missing data is an empty list, not an error.
    fn load(&self) -> Result<Vec<TodoItem>, StoreError>;
    fn save(&self, items: &[TodoItem]) -> Result<(), StoreError>;
}

/// JSON array of `{id, text, isDone}` records in the data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(ITEMS_FILE)
    }

    /// Read, modify and write the list under one store lock, so no other
    /// writer can land in between. Nothing is written when `f` fails.
    pub fn update<T, E>(&self, f: impl FnOnce(&mut Vec<TodoItem>) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        self.ensure_dir()?;
        let _lock = StoreLock::acquire_default(&self.dir).map_err(StoreError::from)?;
        let mut items = self.read()?;
        let out = f(&mut items)?;
        self.write(&items)?;
        Ok(out)
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            path: self.dir.clone(),
            source,
        })
    }

    fn read(&self) -> Result<Vec<TodoItem>, StoreError> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Parse { path, source })
    }

    /// Caller holds the store lock.
    fn write(&self, items: &[TodoItem]) -> Result<(), StoreError> {
        let path = self.path();
        let content = serde_json::to_vec_pretty(items)?;
        atomic_write(&path, &content).map_err(|source| StoreError::Write { path, source })
    }
}

impl TodoStore for JsonFileStore {
    fn load(&self) -> Result<Vec<TodoItem>, StoreError> {
        self.read()
    }

    fn save(&self, items: &[TodoItem]) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let _lock = StoreLock::acquire_default(&self.dir)?;
        self.write(items)
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[derive(Debug, Default)]
struct MemoryState {
    items: Vec<TodoItem>,
    saves: usize,
    failing: bool,
}

/// In-memory store. Clones share state, so whoever keeps a handle can see
/// what the list saved. Also the scratch store for headless CLI edits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<TodoItem>) -> Self {
        let store = Self::default();
        store.state.borrow_mut().items = items;
        store
    }

    pub fn items(&self) -> Vec<TodoItem> {
        self.state.borrow().items.clone()
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.state.borrow().saves
    }

    /// Make every subsequent load/save fail
    pub fn set_failing(&self, failing: bool) {
        self.state.borrow_mut().failing = failing;
    }
}

impl TodoStore for MemoryStore {
    fn load(&self) -> Result<Vec<TodoItem>, StoreError> {
        let state = self.state.borrow();
        if state.failing {
            return Err(StoreError::Unavailable);
        }
        Ok(state.items.clone())
    }

    fn save(&self, items: &[TodoItem]) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        if state.failing {
            return Err(StoreError::Unavailable);
        }
        state.items = items.to_vec();
        state.saves += 1;
        Ok(())
    }
}
