use std::cell::RefCell;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::ensure;

use super::error::StreamError;
use super::mode::OpenMode;

/// A handle to one OS byte resource.
///
/// The handle tracks the resource lifecycle: it starts `Open`, and moves to
/// `Detached` when the raw resource is handed back via [`detach`], or to
/// `Closed` when [`close`] releases it. Both are terminal for I/O: every
/// subsequent read/write/seek/tell/contents call fails with
/// [`StreamError::Detached`].
///
/// Cloning the handle shares the same resource; mutators on the owning
/// message values clone freely while the resource itself stays single-owner.
///
/// The reported size is a snapshot taken at open time and is never
/// re-queried, even after writes.
///
/// [`detach`]: Self::detach
/// [`close`]: Self::close
#[derive(Debug, Clone)]
pub struct StreamHandle {
    inner: Rc<RefCell<State>>,
}

#[derive(Debug)]
enum State {
    Open(OpenStream),
    Detached,
    Closed,
}

#[derive(Debug)]
struct OpenStream {
    file: File,
    mode: OpenMode,
    seekable: bool,
    size: u64,
    path: Option<PathBuf>,
    eof: bool,
}

impl State {
    fn open_mut(&mut self) -> Result<&mut OpenStream, StreamError> {
        match self {
            State::Open(open) => Ok(open),
            State::Detached | State::Closed => Err(StreamError::Detached),
        }
    }

    fn open_ref(&self) -> Option<&OpenStream> {
        match self {
            State::Open(open) => Some(open),
            State::Detached | State::Closed => None,
        }
    }
}

impl StreamHandle {
    /// Opens the file at `path` with a POSIX mode string (`r`, `r+`, `w`,
    /// `w+`, `a`, `a+`, `x`, `x+`, optionally with `b`/`t` flags).
    ///
    /// # Errors
    ///
    /// - [`StreamError::InvalidMode`] when the mode is neither readable nor
    ///   writable by the grammar
    /// - [`StreamError::CannotOpen`] when the OS resource cannot be acquired
    pub fn open(path: impl AsRef<Path>, mode: &str) -> Result<Self, StreamError> {
        let mode = OpenMode::parse(mode)?;
        let path = path.as_ref().to_path_buf();

        let file = mode
            .open_options()
            .open(&path)
            .map_err(|e| StreamError::cannot_open(path.display(), e))?;

        let size =
            file.metadata().map_err(|e| StreamError::cannot_open(path.display(), e))?.len();

        debug!(path = %path.display(), mode = mode.as_str(), size, "opened stream");

        Ok(Self::from_open(OpenStream { file, mode, seekable: true, size, path: Some(path), eof: false }))
    }

    /// Wraps an already-open descriptor. The size snapshot is taken here.
    ///
    /// # Errors
    ///
    /// - [`StreamError::InvalidMode`] when the mode string is invalid
    /// - [`StreamError::CannotOpen`] when the descriptor cannot be stat'ed
    pub fn from_file(file: File, mode: &str) -> Result<Self, StreamError> {
        let mode = OpenMode::parse(mode)?;
        let size = file.metadata().map_err(|e| StreamError::cannot_open("<file>", e))?.len();

        Ok(Self::from_open(OpenStream { file, mode, seekable: true, size, path: None, eof: false }))
    }

    fn from_open(open: OpenStream) -> Self {
        Self { inner: Rc::new(RefCell::new(State::Open(open))) }
    }

    /// Reads up to `len` bytes from the current position; fewer come back at
    /// end-of-resource. The buffer grows with the bytes that actually
    /// arrive, so `len` is an upper bound, not an allocation.
    ///
    /// # Errors
    ///
    /// - [`StreamError::InvalidLength`] when `len < 0`
    /// - [`StreamError::NotReadable`] when the mode disallows reads
    /// - [`StreamError::Detached`] after detach/close
    /// - [`StreamError::Io`] on a read fault
    pub fn read(&self, len: i64) -> Result<Bytes, StreamError> {
        ensure!(len >= 0, StreamError::invalid_length(len));

        let mut state = self.inner.borrow_mut();
        let open = state.open_mut()?;
        ensure!(open.mode.is_readable(), StreamError::NotReadable);

        let mut buf = Vec::new();
        #[allow(clippy::cast_sign_loss, reason = "len is checked non-negative above")]
        let n = (&open.file).take(len as u64).read_to_end(&mut buf)?;

        if n == 0 && len > 0 {
            open.eof = true;
        }

        Ok(Bytes::from(buf))
    }

    /// Writes `data`, returning the number of bytes the resource accepted.
    ///
    /// A zero-byte write count is treated as a fault.
    ///
    /// # Errors
    ///
    /// - [`StreamError::NotWritable`] when the mode disallows writes
    /// - [`StreamError::Detached`] after detach/close
    /// - [`StreamError::Io`] when the resource accepts zero bytes or faults
    pub fn write(&self, data: &[u8]) -> Result<usize, StreamError> {
        let mut state = self.inner.borrow_mut();
        let open = state.open_mut()?;
        ensure!(open.mode.is_writable(), StreamError::NotWritable);

        let n = open.file.write(data)?;
        if n == 0 {
            error!("stream accepted zero bytes");
            return Err(StreamError::io(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "stream accepted zero bytes",
            )));
        }

        Ok(n)
    }

    /// Moves the resource position, returning the new offset.
    ///
    /// # Errors
    ///
    /// - [`StreamError::NotSeekable`] when the handle is not seekable
    /// - [`StreamError::Detached`] after detach/close
    /// - [`StreamError::SeekFailed`] on an OS fault
    pub fn seek(&self, pos: SeekFrom) -> Result<u64, StreamError> {
        let mut state = self.inner.borrow_mut();
        let open = state.open_mut()?;
        ensure!(open.seekable, StreamError::NotSeekable);

        let offset = open.file.seek(pos).map_err(StreamError::seek_failed)?;
        open.eof = false;

        Ok(offset)
    }

    /// Seeks back to the start of the resource.
    ///
    /// # Errors
    ///
    /// Same as [`seek`](Self::seek).
    pub fn rewind(&self) -> Result<(), StreamError> {
        self.seek(SeekFrom::Start(0)).map(|_| ())
    }

    /// Reports the current resource position.
    ///
    /// # Errors
    ///
    /// [`StreamError::Detached`] after detach/close, [`StreamError::SeekFailed`]
    /// when the position cannot be determined.
    pub fn tell(&self) -> Result<u64, StreamError> {
        let mut state = self.inner.borrow_mut();
        let open = state.open_mut()?;

        open.file.stream_position().map_err(StreamError::seek_failed)
    }

    /// Reads from the current position to end-of-resource.
    ///
    /// A legitimately empty remainder is a successful empty result, not a
    /// fault.
    ///
    /// # Errors
    ///
    /// [`StreamError::Detached`] after detach/close, [`StreamError::Io`] when
    /// the read reports a failure.
    pub fn contents(&self) -> Result<Bytes, StreamError> {
        let mut state = self.inner.borrow_mut();
        let open = state.open_mut()?;

        let mut buf = Vec::new();
        open.file.read_to_end(&mut buf)?;
        open.eof = true;

        Ok(Bytes::from(buf))
    }

    /// The size snapshot taken when the resource was opened; `None` once the
    /// handle is detached or closed.
    pub fn size(&self) -> Option<u64> {
        self.inner.borrow().open_ref().map(|open| open.size)
    }

    /// True once a read has hit end-of-resource, and always true after
    /// detach/close.
    pub fn eof(&self) -> bool {
        self.inner.borrow().open_ref().is_none_or(|open| open.eof)
    }

    pub fn is_readable(&self) -> bool {
        self.inner.borrow().open_ref().is_some_and(|open| open.mode.is_readable())
    }

    pub fn is_writable(&self) -> bool {
        self.inner.borrow().open_ref().is_some_and(|open| open.mode.is_writable())
    }

    pub fn is_seekable(&self) -> bool {
        self.inner.borrow().open_ref().is_some_and(|open| open.seekable)
    }

    /// The full metadata mapping, or `None` once detached/closed.
    ///
    /// Keys mirror the classic stream metadata shape: `timed_out`, `blocked`,
    /// `eof`, `unread_bytes`, `stream_type`, `wrapper_type`, `mode`,
    /// `seekable`, `uri`.
    pub fn metadata(&self) -> Option<Map<String, Value>> {
        let state = self.inner.borrow();
        let open = state.open_ref()?;

        let mut metadata = Map::new();
        metadata.insert("timed_out".to_string(), Value::from(false));
        metadata.insert("blocked".to_string(), Value::from(true));
        metadata.insert("eof".to_string(), Value::from(open.eof));
        metadata.insert("unread_bytes".to_string(), Value::from(0u64));
        metadata.insert("stream_type".to_string(), Value::from("STDIO"));
        metadata.insert("wrapper_type".to_string(), Value::from("plainfile"));
        metadata.insert("mode".to_string(), Value::from(open.mode.as_str()));
        metadata.insert("seekable".to_string(), Value::from(open.seekable));
        metadata.insert(
            "uri".to_string(),
            Value::from(open.path.as_deref().map(|p| p.display().to_string()).unwrap_or_default()),
        );

        Some(metadata)
    }

    /// The metadata value for one key; `None` for unknown keys or once
    /// detached/closed.
    pub fn metadata_value(&self, key: &str) -> Option<Value> {
        self.metadata().and_then(|metadata| metadata.get(key).cloned())
    }

    /// Releases the resource from tracking without closing it and hands it
    /// back to the caller, who now owns its lifetime. Cached metadata (mode,
    /// seekable flag, size) is cleared.
    ///
    /// Returns `None` when the handle is already detached or closed.
    pub fn detach(&self) -> Option<File> {
        let mut state = self.inner.borrow_mut();

        match std::mem::replace(&mut *state, State::Detached) {
            State::Open(open) => {
                debug!("detached stream");
                Some(open.file)
            }
            State::Detached => None,
            State::Closed => {
                // close is terminal; stay closed
                *state = State::Closed;
                None
            }
        }
    }

    /// Releases the OS resource if the handle is still open, then detaches.
    pub fn close(&self) {
        let mut state = self.inner.borrow_mut();

        match std::mem::replace(&mut *state, State::Closed) {
            State::Open(open) => {
                drop(open.file);
                debug!("closed stream");
            }
            // already terminal; keep the prior state
            State::Detached => *state = State::Detached,
            State::Closed => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write as _;

    use tempfile::{NamedTempFile, tempdir};

    fn fixture(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_up_to_len_bytes() {
        let file = fixture(b"hello world");
        let stream = StreamHandle::open(file.path(), "r").unwrap();

        assert_eq!(stream.read(5).unwrap(), Bytes::from_static(b"hello"));
        assert_eq!(stream.tell().unwrap(), 5);
        assert_eq!(stream.read(100).unwrap(), Bytes::from_static(b" world"));
    }

    #[test]
    fn a_huge_length_reads_only_what_is_there() {
        let file = fixture(b"abc");
        let stream = StreamHandle::open(file.path(), "r").unwrap();

        // len is an upper bound; nothing is allocated for the unread part
        assert_eq!(stream.read(i64::MAX - 1).unwrap(), Bytes::from_static(b"abc"));
        assert_eq!(stream.tell().unwrap(), 3);
    }

    #[test]
    fn negative_length_is_rejected() {
        let file = fixture(b"abc");
        let stream = StreamHandle::open(file.path(), "r").unwrap();

        assert!(matches!(stream.read(-1), Err(StreamError::InvalidLength { len: -1 })));
    }

    #[test]
    fn eof_flag_follows_short_reads() {
        let file = fixture(b"abc");
        let stream = StreamHandle::open(file.path(), "r").unwrap();

        assert!(!stream.eof());
        stream.read(3).unwrap();
        assert!(!stream.eof());
        stream.read(1).unwrap();
        assert!(stream.eof());

        stream.rewind().unwrap();
        assert!(!stream.eof());
    }

    #[test]
    fn write_only_mode_rejects_reads() {
        let file = fixture(b"");
        let stream = StreamHandle::open(file.path(), "w").unwrap();

        assert!(matches!(stream.read(1), Err(StreamError::NotReadable)));
        assert!(!stream.is_readable());
        assert!(stream.is_writable());
    }

    #[test]
    fn read_only_mode_rejects_writes() {
        let file = fixture(b"abc");
        let stream = StreamHandle::open(file.path(), "rb").unwrap();

        assert!(matches!(stream.write(b"x"), Err(StreamError::NotWritable)));
    }

    #[test]
    fn writes_report_accepted_count() {
        let file = fixture(b"");
        let stream = StreamHandle::open(file.path(), "w+").unwrap();

        assert_eq!(stream.write(b"hello").unwrap(), 5);
        stream.rewind().unwrap();
        assert_eq!(stream.contents().unwrap(), Bytes::from_static(b"hello"));
    }

    #[test]
    fn size_is_a_snapshot_from_open_time() {
        let file = fixture(b"hello");
        let stream = StreamHandle::open(file.path(), "r+").unwrap();

        assert_eq!(stream.size(), Some(5));
        stream.seek(SeekFrom::End(0)).unwrap();
        stream.write(b" world").unwrap();
        assert_eq!(stream.size(), Some(5));
    }

    #[test]
    fn contents_of_an_empty_remainder_is_success() {
        let file = fixture(b"abc");
        let stream = StreamHandle::open(file.path(), "r").unwrap();

        stream.contents().unwrap();
        assert_eq!(stream.contents().unwrap(), Bytes::new());
    }

    #[test]
    fn detach_hands_back_the_resource_and_poisons_the_handle() {
        let file = fixture(b"abc");
        let stream = StreamHandle::open(file.path(), "r+").unwrap();

        let resource = stream.detach();
        assert!(resource.is_some());
        assert!(stream.detach().is_none());

        assert!(matches!(stream.read(1), Err(StreamError::Detached)));
        assert!(matches!(stream.write(b"x"), Err(StreamError::Detached)));
        assert!(matches!(stream.seek(SeekFrom::Start(0)), Err(StreamError::Detached)));
        assert!(matches!(stream.tell(), Err(StreamError::Detached)));
        assert!(matches!(stream.contents(), Err(StreamError::Detached)));

        assert_eq!(stream.size(), None);
        assert_eq!(stream.metadata(), None);
        assert!(!stream.is_readable());
        assert!(!stream.is_writable());
        assert!(!stream.is_seekable());
        assert!(stream.eof());
    }

    #[test]
    fn close_releases_and_detaches() {
        let file = fixture(b"abc");
        let stream = StreamHandle::open(file.path(), "r").unwrap();

        stream.close();
        assert!(matches!(stream.read(1), Err(StreamError::Detached)));
        assert!(stream.detach().is_none());
    }

    #[test]
    fn metadata_reports_the_open_state() {
        let file = fixture(b"abc");
        let stream = StreamHandle::open(file.path(), "rb").unwrap();

        let metadata = stream.metadata().unwrap();
        assert_eq!(metadata["mode"], Value::from("rb"));
        assert_eq!(metadata["seekable"], Value::from(true));
        assert_eq!(metadata["eof"], Value::from(false));
        assert_eq!(metadata["uri"], Value::from(file.path().display().to_string()));

        assert_eq!(stream.metadata_value("mode"), Some(Value::from("rb")));
        assert_eq!(stream.metadata_value("no_such_key"), None);
    }

    #[test]
    fn open_rejects_invalid_modes_and_missing_files() {
        assert!(matches!(StreamHandle::open("/tmp/whatever", "z"), Err(StreamError::InvalidMode { .. })));

        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(StreamHandle::open(&missing, "r"), Err(StreamError::CannotOpen { .. })));
    }

    #[test]
    fn exclusive_mode_refuses_existing_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fresh");

        let stream = StreamHandle::open(&path, "x").unwrap();
        stream.write(b"data").unwrap();
        stream.close();

        assert!(matches!(StreamHandle::open(&path, "x"), Err(StreamError::CannotOpen { .. })));
    }

    #[test]
    fn wraps_an_already_open_descriptor() {
        let file = fixture(b"wrapped");
        let handle = file.reopen().unwrap();
        let stream = StreamHandle::from_file(handle, "r").unwrap();

        assert_eq!(stream.size(), Some(7));
        assert_eq!(stream.contents().unwrap(), Bytes::from_static(b"wrapped"));
        assert_eq!(stream.metadata().unwrap()["uri"], Value::from(""));
    }

    #[test]
    fn clones_share_the_same_resource() {
        let file = fixture(b"shared");
        let stream = StreamHandle::open(file.path(), "r").unwrap();
        let alias = stream.clone();

        assert_eq!(alias.read(3).unwrap(), Bytes::from_static(b"sha"));
        assert_eq!(stream.tell().unwrap(), 3);

        stream.close();
        assert!(matches!(alias.read(1), Err(StreamError::Detached)));
    }
}
