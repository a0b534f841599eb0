//! ak-save: Save/restore system for Ashen Keep
//!
//! Persists a [`Player`] as a `key,value` text record inside a save
//! directory. Writes go through a temporary file that is renamed over the
//! destination.

mod record;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use ak_core::player::{Player, PlayerClass};

pub use record::{HEADER, decode, encode};

/// Directory used when none is configured
pub const DEFAULT_SAVE_DIR: &str = "saves";

/// File name used when neither an explicit name nor a player name is known
pub const DEFAULT_SAVE_FILE: &str = "player.save";

/// Extension of save records
pub const SAVE_EXTENSION: &str = "save";

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Save file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Save file corrupted: {0}")]
    Corrupted(String),
}

/// Summary of a save record, for the save browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub path: PathBuf,
    pub name: String,
    pub class: Option<PlayerClass>,
    pub level: i32,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Resolve where a player's record lives inside `dir`.
///
/// An explicit file name wins, then `{player_name}.save`, then
/// [`DEFAULT_SAVE_FILE`]. The result always stays directly inside `dir`:
/// an explicit name keeps only its last component and path separators in a
/// player name are replaced.
pub fn resolve_save_path(dir: &Path, explicit: Option<&str>, player_name: &str) -> PathBuf {
    if let Some(name) = explicit.and_then(|name| Path::new(name).file_name()) {
        return dir.join(name);
    }
    match file_stem_for(player_name) {
        Some(stem) => dir.join(format!("{}.{}", stem, SAVE_EXTENSION)),
        None => dir.join(DEFAULT_SAVE_FILE),
    }
}

/// File stem derived from a player name, or `None` if nothing usable is left
fn file_stem_for(player_name: &str) -> Option<String> {
    let stem: String = player_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim().trim_matches('.');
    (!stem.is_empty()).then(|| stem.to_string())
}

/// Save a player to `path`, replacing any existing record
pub fn save_game(player: &Player, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let text = encode(player, Utc::now());
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, text)?;
    if let Err(e) = fs::rename(&tmp, path) {
        fs::remove_file(&tmp).ok();
        return Err(e.into());
    }

    tracing::info!(
        path = %path.display(),
        name = %player.name,
        level = player.level,
        "game saved"
    );
    Ok(())
}

/// Load a player from `path`
pub fn load_game(path: impl AsRef<Path>) -> Result<Player, SaveError> {
    let path = path.as_ref();
    let text = read_record(path)?;
    let player = decode(&text)?;
    tracing::info!(
        path = %path.display(),
        name = %player.name,
        level = player.level,
        "game loaded"
    );
    Ok(player)
}

fn read_record(path: &Path) -> Result<String, SaveError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SaveError::NotFound(path.to_path_buf()),
        _ => SaveError::Io(e),
    })
}

/// Load only the identifying fields of a record
pub fn load_summary(path: impl AsRef<Path>) -> Result<SaveSummary, SaveError> {
    let path = path.as_ref();
    let text = read_record(path)?;
    let fields = record::Fields::parse(&text)?;

    let name = fields
        .text("NAME")
        .ok_or_else(|| SaveError::Corrupted("missing NAME".to_string()))?
        .into_owned();
    let class = fields
        .int("CLASS")?
        .and_then(|code| i32::try_from(code).ok())
        .and_then(PlayerClass::from_code);
    let level = fields
        .int("LEVEL")?
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(1);
    let saved_at = fields
        .int("TIMESTAMP")?
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    Ok(SaveSummary {
        path: path.to_path_buf(),
        name,
        class,
        level,
        saved_at,
    })
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    fs::remove_file(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SaveError::NotFound(path.to_path_buf()),
        _ => SaveError::Io(e),
    })?;
    tracing::info!(path = %path.display(), "save deleted");
    Ok(())
}

/// List readable save records in `dir`, newest first.
///
/// A missing directory yields an empty list; unreadable records are skipped.
pub fn list_saves(dir: impl AsRef<Path>) -> Result<Vec<SaveSummary>, SaveError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut saves = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == SAVE_EXTENSION) {
            match load_summary(&path) {
                Ok(summary) => saves.push(summary),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping save"),
            }
        }
    }

    saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    Ok(saves)
}

/// A save directory plus an optional fixed file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStore {
    dir: PathBuf,
    file_name: Option<String>,
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DIR)
    }
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            file_name: None,
        }
    }

    /// Always use `file_name` instead of deriving it from the player name
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, player_name: &str) -> PathBuf {
        resolve_save_path(&self.dir, self.file_name.as_deref(), player_name)
    }

    pub fn save(&self, player: &Player) -> Result<PathBuf, SaveError> {
        let path = self.path_for(&player.name);
        save_game(player, &path)?;
        Ok(path)
    }

    pub fn load(&self, player_name: &str) -> Result<Player, SaveError> {
        load_game(self.path_for(player_name))
    }

    pub fn exists(&self, player_name: &str) -> bool {
        save_exists(self.path_for(player_name))
    }

    pub fn delete(&self, player_name: &str) -> Result<(), SaveError> {
        delete_save(self.path_for(player_name))
    }

    pub fn list(&self) -> Result<Vec<SaveSummary>, SaveError> {
        list_saves(&self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ak_core::object::health_potion;
    use ak_core::player::initialize_player;

    #[test]
    fn test_resolve_save_path() {
        let dir = Path::new("saves");
        assert_eq!(
            resolve_save_path(dir, Some("custom.txt"), "Aria"),
            dir.join("custom.txt")
        );
        assert_eq!(resolve_save_path(dir, None, "Aria"), dir.join("Aria.save"));
        assert_eq!(resolve_save_path(dir, Some(""), ""), dir.join("player.save"));
    }

    #[test]
    fn test_resolve_save_path_stays_in_dir() {
        let dir = Path::new("saves");
        assert_eq!(
            resolve_save_path(dir, None, "../escaped"),
            dir.join("_escaped.save")
        );
        assert_eq!(resolve_save_path(dir, None, "a/b\\c"), dir.join("a_b_c.save"));
        assert_eq!(resolve_save_path(dir, None, ".."), dir.join(DEFAULT_SAVE_FILE));
        assert_eq!(
            resolve_save_path(dir, Some("../../etc/slot.save"), "Aria"),
            dir.join("slot.save")
        );
        assert_eq!(resolve_save_path(dir, Some(".."), "Aria"), dir.join("Aria.save"));
    }

    #[test]
    fn test_traversal_name_saved_inside_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let saves = tmp.path().join("saves");
        let store = SaveStore::new(&saves);
        let player = initialize_player("../escaped", PlayerClass::Rogue);

        let path = store.save(&player).unwrap();

        assert_eq!(path.parent(), Some(saves.as_path()));
        assert!(!tmp.path().join("escaped.save").exists());
        assert_eq!(store.load("../escaped").unwrap().name, "../escaped");
    }

    #[test]
    fn test_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveStore::new(tmp.path().join("nested"));

        let mut player = initialize_player("Aria", PlayerClass::Mage);
        player.gold = 77;
        player.inventory.add(health_potion(2)).unwrap();

        let path = store.save(&player).unwrap();
        assert_eq!(path, tmp.path().join("nested").join("Aria.save"));
        assert!(store.exists("Aria"));
        assert!(!path.with_extension("save.tmp").exists());

        let loaded = store.load("Aria").unwrap();
        assert_eq!(loaded, player);
    }

    #[test]
    fn test_save_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("hero.save");

        let mut player = initialize_player("Hero", PlayerClass::Paladin);
        save_game(&player, &path).unwrap();
        player.level = 4;
        save_game(&player, &path).unwrap();

        assert_eq!(load_game(&path).unwrap().level, 4);
    }

    #[test]
    fn test_load_nonexistent() {
        let tmp = tempfile::tempdir().unwrap();
        let result = load_game(tmp.path().join("nobody.save"));
        assert!(matches!(result, Err(SaveError::NotFound(_))));
    }

    #[test]
    fn test_load_without_header() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.save");
        fs::write(&path, "NAME,Aria\nCLASS,2\n").unwrap();
        assert!(matches!(load_game(&path), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_delete_save() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveStore::new(tmp.path()).with_file_name("slot1.save");
        let player = initialize_player("Rook", PlayerClass::Rogue);

        store.save(&player).unwrap();
        assert!(store.exists("anyone"));
        store.delete("anyone").unwrap();
        assert!(!store.exists("anyone"));
        assert!(matches!(store.delete("anyone"), Err(SaveError::NotFound(_))));
    }

    #[test]
    fn test_list_saves() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SaveStore::new(tmp.path());

        store
            .save(&initialize_player("Aria", PlayerClass::Mage))
            .unwrap();
        store
            .save(&initialize_player("Rook", PlayerClass::Rogue))
            .unwrap();
        fs::write(tmp.path().join("junk.save"), "not a save").unwrap();
        fs::write(tmp.path().join("notes.txt"), "key,value\nNAME,x\n").unwrap();

        let mut names: Vec<String> = store.list().unwrap().into_iter().map(|s| s.name).collect();
        names.sort();
        assert_eq!(names, vec!["Aria", "Rook"]);
    }

    #[test]
    fn test_list_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(list_saves(tmp.path().join("absent")).unwrap().is_empty());
    }

    #[test]
    fn test_summary_reads_timestamp() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("old.save");
        fs::write(
            &path,
            "key,value\nNAME,Old\nCLASS,1\nLEVEL,6\nTIMESTAMP,1700000000\n",
        )
        .unwrap();

        let summary = load_summary(&path).unwrap();
        assert_eq!(summary.name, "Old");
        assert_eq!(summary.class, Some(PlayerClass::Rogue));
        assert_eq!(summary.level, 6);
        assert_eq!(summary.saved_at.map(|t| t.timestamp()), Some(1_700_000_000));
    }
}
