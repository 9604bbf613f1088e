use crate::consts;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use thiserror::Error;

/// Somewhere to keep the high score between runs
pub(crate) trait ScoreStore: fmt::Debug + Send + Sync {
    /// Read the stored high score.  Returns `Ok(None)` if nothing has been
    /// stored yet.
    fn load(&self) -> Result<Option<u32>, LoadError>;

    fn save(&self, score: u32) -> Result<(), SaveError>;
}

/// A [`ScoreStore`] backed by a JSON file mapping string keys to string
/// values.  The high score is stored as a decimal string under
/// [`HIGH_SCORE_KEY`][consts::HIGH_SCORE_KEY]; any other keys in the file are
/// left alone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) fn new(path: PathBuf) -> FileStore {
        FileStore { path }
    }

    /// Return the default high score file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("snakebite").join("highscore.json"))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Option<BTreeMap<String, String>>, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src)
            .map(Some)
            .map_err(LoadError::deserialize)
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> Result<Option<u32>, LoadError> {
        let Some(entries) = self.read_entries()? else {
            return Ok(None);
        };
        entries
            .get(consts::HIGH_SCORE_KEY)
            .map(|s| s.trim().parse::<u32>().map_err(LoadError::parse))
            .transpose()
    }

    fn save(&self, score: u32) -> Result<(), SaveError> {
        // Keep whatever else is in the file, but don't let a corrupt file
        // stop us from recording the score.
        let mut entries = match self.read_entries() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                log::warn!(
                    "Discarding unreadable contents of {}: {}",
                    self.path.display(),
                    error_chain(&e)
                );
                BTreeMap::new()
            }
        };
        entries.insert(String::from(consts::HIGH_SCORE_KEY), score.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

/// Load the high score from `store`, falling back to
/// [`INITIAL_SCORE`][consts::INITIAL_SCORE] if nothing is stored or the store
/// can't be read
pub(crate) fn load_high_score(store: &dyn ScoreStore) -> u32 {
    match store.load() {
        Ok(Some(score)) => {
            log::info!("Loaded high score {score}");
            score
        }
        Ok(None) => {
            log::info!("No high score stored yet");
            consts::INITIAL_SCORE
        }
        Err(e) => {
            log::warn!("{}", error_chain(&e));
            consts::INITIAL_SCORE
        }
    }
}

/// Handle for handing scores to a background writer thread.  Submitting never
/// blocks, and the outcome of each write is only logged.
#[derive(Clone, Debug)]
pub(crate) struct ScoreWriter {
    sender: mpsc::Sender<u32>,
}

impl ScoreWriter {
    /// Start a writer thread that saves every submitted score to `store`.
    /// The thread runs until every clone of the returned `ScoreWriter` has
    /// been dropped.
    pub(crate) fn spawn(store: Arc<dyn ScoreStore>) -> std::io::Result<(ScoreWriter, WriterThread)> {
        let (sender, receiver) = mpsc::channel::<u32>();
        let handle = thread::Builder::new()
            .name(String::from("highscore-writer"))
            .spawn(move || {
                for score in receiver {
                    match store.save(score) {
                        Ok(()) => log::debug!("Saved high score {score}"),
                        Err(e) => log::error!("{}", error_chain(&e)),
                    }
                }
            })?;
        Ok((ScoreWriter { sender }, WriterThread { handle }))
    }

    pub(crate) fn submit(&self, score: u32) {
        if self.sender.send(score).is_err() {
            log::error!("High score writer has stopped; score {score} not saved");
        }
    }
}

/// The background thread behind a [`ScoreWriter`]
#[derive(Debug)]
pub(crate) struct WriterThread {
    handle: thread::JoinHandle<()>,
}

impl WriterThread {
    /// Wait for all pending writes to complete.  This only returns once every
    /// `ScoreWriter` for the thread has been dropped.
    pub(crate) fn finish(self) {
        if self.handle.join().is_err() {
            log::error!("High score writer thread panicked");
        }
    }
}

/// The best score seen so far, plus where to send new records
#[derive(Clone, Debug)]
pub(crate) struct HighScore {
    best: u32,
    writer: Option<ScoreWriter>,
}

impl HighScore {
    pub(crate) fn new(best: u32, writer: Option<ScoreWriter>) -> HighScore {
        HighScore { best, writer }
    }

    /// A high score that is never persisted
    pub(crate) fn in_memory(best: u32) -> HighScore {
        HighScore::new(best, None)
    }

    pub(crate) fn get(&self) -> u32 {
        self.best
    }

    /// Record `score` if it beats the current high score, handing it off to
    /// be saved in the background.  Returns `true` if it was a new record.
    pub(crate) fn offer(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Some(ref writer) = self.writer {
            writer.submit(score);
        }
        true
    }
}

/// Render an error and all of its sources on one line
pub(crate) fn error_chain(e: &dyn std::error::Error) -> String {
    let mut s = e.to_string();
    let mut source = e.source();
    while let Some(src) = source {
        s.push_str(": ");
        s.push_str(&src.to_string());
        source = src.source();
    }
    s
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }

    #[cfg(test)]
    pub(crate) fn unavailable() -> Self {
        SaveError(SaveErrorSource::Write(std::io::Error::other(
            "storage unavailable",
        )))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }

    fn parse(e: std::num::ParseIntError) -> Self {
        LoadError(LoadErrorSource::Parse(e))
    }

    #[cfg(test)]
    pub(crate) fn unavailable() -> Self {
        LoadError(LoadErrorSource::Read(std::io::Error::other(
            "storage unavailable",
        )))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score file")]
    Deserialize(#[source] serde_json::Error),
    #[error("stored high score is not an integer")]
    Parse(#[source] std::num::ParseIntError),
}


#[cfg(test)]
mod tests {
    use super::testing::{BrokenStore, ChannelStore};
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn file_store_missing_file() {
        let tmpdir = tempdir().unwrap();
        let store = FileStore::new(tmpdir.path().join("highscore.json"));
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(load_high_score(&store), 1);
    }

    #[test]
    fn file_store_save_and_load() {
        let tmpdir = tempdir().unwrap();
        let store = FileStore::new(tmpdir.path().join("nested").join("highscore.json"));
        store.save(42).unwrap();
        assert_eq!(store.load().unwrap(), Some(42));
        let src = fs_err::read_to_string(store.path()).unwrap();
        assert_eq!(src, "{\n  \"high-score\": \"42\"\n}\n");
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "{\"theme\": \"dark\", \"high-score\": \"7\"}").unwrap();
        let store = FileStore::new(path);
        assert_eq!(store.load().unwrap(), Some(7));
        store.save(12).unwrap();
        let src = fs_err::read_to_string(store.path()).unwrap();
        assert_eq!(src, "{\n  \"high-score\": \"12\",\n  \"theme\": \"dark\"\n}\n");
    }

    #[test]
    fn file_store_no_key() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "{\"theme\": \"dark\"}").unwrap();
        assert_eq!(FileStore::new(path).load().unwrap(), None);
    }

    #[test]
    fn file_store_bad_value() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "{\"high-score\": \"lots\"}").unwrap();
        let store = FileStore::new(path);
        assert!(store.load().is_err());
        assert_eq!(load_high_score(&store), 1);
    }

    #[test]
    fn file_store_corrupt_file_is_overwritten() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "not json").unwrap();
        let store = FileStore::new(path);
        assert_eq!(load_high_score(&store), 1);
        store.save(9).unwrap();
        assert_eq!(store.load().unwrap(), Some(9));
    }

    #[test]
    fn broken_store_loads_default() {
        assert_eq!(load_high_score(&BrokenStore), 1);
    }

    #[test]
    fn offer_only_records_improvements() {
        let mut high = HighScore::in_memory(10);
        assert!(!high.offer(5));
        assert!(!high.offer(10));
        assert_eq!(high.get(), 10);
        assert!(high.offer(11));
        assert_eq!(high.get(), 11);
    }

    #[test]
    fn records_are_written_in_background() {
        let (tx, rx) = mpsc::channel();
        let store = ChannelStore {
            stored: Some(3),
            saves: Mutex::new(tx),
        };
        let best = load_high_score(&store);
        assert_eq!(best, 3);
        let (writer, thread) = ScoreWriter::spawn(Arc::new(store)).unwrap();
        let mut high = HighScore::new(best, Some(writer));
        assert!(!high.offer(2));
        assert!(high.offer(8));
        assert!(high.offer(13));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(8));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(13));
        drop(high);
        thread.finish();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn failed_writes_keep_record() {
        let (writer, thread) = ScoreWriter::spawn(Arc::new(BrokenStore)).unwrap();
        let mut high = HighScore::new(1, Some(writer));
        assert!(high.offer(6));
        assert_eq!(high.get(), 6);
        drop(high);
        thread.finish();
    }

    #[test]
    fn error_chain_includes_sources() {
        let e = LoadError::unavailable();
        assert_eq!(
            error_chain(&e),
            "Failed to read high score from disk: failed to read high score file: storage unavailable"
        );
    }
}
