//! In-memory fakes for the generator's capabilities.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::io::{self, Cursor, Read, Write};
use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::format::{FormatError, SourceFormatter};
use crate::fs::FileSystem;
use crate::lines::LineSource;
use crate::template::{TemplateContext, TemplateEngine, TemplateError, TemplateExecutor};

/// Filesystem operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    Open,
    Create,
    ReadAll,
    WriteAll,
    MakeDir,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::Create => "create",
            Self::ReadAll => "read",
            Self::WriteAll => "write",
            Self::MakeDir => "mkdir",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<Utf8PathBuf, Vec<u8>>,
    dirs: BTreeSet<Utf8PathBuf>,
    failures: BTreeSet<(Operation, Option<Utf8PathBuf>)>,
    faulty_reads: BTreeSet<Utf8PathBuf>,
    log: Vec<(Operation, Utf8PathBuf)>,
}

impl MemoryState {
    fn check(&mut self, op: Operation, path: &Utf8Path) -> io::Result<()> {
        self.log.push((op, path.to_path_buf()));
        let fails = self.failures.contains(&(op, Some(path.to_path_buf())))
            || self.failures.contains(&(op, None));
        if fails {
            return Err(io::Error::other(format!("{op} error")));
        }
        Ok(())
    }

    fn parent_exists(&self, path: &Utf8Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => self.dirs.contains(parent),
            _ => true,
        }
    }
}

/// [`FileSystem`] backed by shared in-memory maps.
///
/// Clones share state, so a test can keep a handle for inspection after
/// moving one into a generator.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a readable file.
    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.state
            .borrow_mut()
            .files
            .insert(Utf8PathBuf::from(path), contents.as_bytes().to_vec());
        self
    }

    /// Seeds a file whose reader faults after `contents`.
    pub fn with_faulty_file(self, path: &str, contents: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.faulty_reads.insert(Utf8PathBuf::from(path));
            state
                .files
                .insert(Utf8PathBuf::from(path), contents.as_bytes().to_vec());
        }
        self
    }

    /// Makes every `op` fail.
    pub fn failing(self, op: Operation) -> Self {
        self.insert_failure(op, None)
    }

    /// Makes `op` fail for `path` only.
    pub fn failing_at(self, op: Operation, path: &str) -> Self {
        self.insert_failure(op, Some(Utf8PathBuf::from(path)))
    }

    fn insert_failure(self, op: Operation, path: Option<Utf8PathBuf>) -> Self {
        self.state.borrow_mut().failures.insert((op, path));
        self
    }

    /// Returns the contents of `path` as text.
    pub fn contents(&self, path: &str) -> Option<String> {
        self.state
            .borrow()
            .files
            .get(Utf8Path::new(path))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Lists every stored file path.
    pub fn file_paths(&self) -> Vec<Utf8PathBuf> {
        self.state.borrow().files.keys().cloned().collect()
    }

    /// Returns `true` when `path` was created as a directory.
    pub fn has_dir(&self, path: &str) -> bool {
        self.state.borrow().dirs.contains(Utf8Path::new(path))
    }

    /// Returns every operation attempted so far, in order.
    pub fn operations(&self) -> Vec<(Operation, Utf8PathBuf)> {
        self.state.borrow().log.clone()
    }
}

impl FileSystem for MemoryFileSystem {
    fn open(&self, path: &Utf8Path) -> io::Result<Box<dyn Read>> {
        let mut state = self.state.borrow_mut();
        state.check(Operation::Open, path)?;
        let contents = state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
        if state.faulty_reads.contains(path) {
            let text = String::from_utf8_lossy(&contents).into_owned();
            return Ok(Box::new(FaultyReader::new(&text, "read error")));
        }
        Ok(Box::new(Cursor::new(contents)))
    }

    fn create(&self, path: &Utf8Path) -> io::Result<Box<dyn Write>> {
        let mut state = self.state.borrow_mut();
        state.check(Operation::Create, path)?;
        if !state.parent_exists(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "parent dir missing"));
        }
        state.files.insert(path.to_path_buf(), Vec::new());
        Ok(Box::new(MemoryFile {
            path: path.to_path_buf(),
            state: Rc::clone(&self.state),
        }))
    }

    fn read_all(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        let mut state = self.state.borrow_mut();
        state.check(Operation::ReadAll, path)?;
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write_all(&self, path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.check(Operation::WriteAll, path)?;
        state.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn make_dir(&self, path: &Utf8Path) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.check(Operation::MakeDir, path)?;
        state.dirs.insert(path.to_path_buf());
        Ok(())
    }
}

struct MemoryFile {
    path: Utf8PathBuf,
    state: Rc<RefCell<MemoryState>>,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state
            .borrow_mut()
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader yielding `contents` and then failing with `message`.
#[derive(Debug)]
pub struct FaultyReader {
    contents: Cursor<Vec<u8>>,
    message: String,
}

impl FaultyReader {
    pub fn new(contents: &str, message: &str) -> Self {
        Self {
            contents: Cursor::new(contents.as_bytes().to_vec()),
            message: message.to_owned(),
        }
    }
}

impl Read for FaultyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.contents.read(buf)? {
            0 => Err(io::Error::other(self.message.clone())),
            read => Ok(read),
        }
    }
}

/// [`LineSource`] replaying fixed lines, optionally ending in a fault.
#[derive(Debug)]
pub struct ScriptedLines {
    pending: VecDeque<String>,
    current: String,
    fault: Option<io::Error>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: lines.into_iter().map(Into::into).collect(),
            current: String::new(),
            fault: None,
        }
    }

    /// Ends the sequence with a read fault carrying `message`.
    pub fn failing_with(mut self, message: &str) -> Self {
        self.fault = Some(io::Error::other(message.to_owned()));
        self
    }
}

impl LineSource for ScriptedLines {
    fn scan(&mut self) -> bool {
        match self.pending.pop_front() {
            Some(line) => {
                self.current = line;
                true
            }
            None => {
                self.current.clear();
                false
            }
        }
    }

    fn text(&self) -> &str {
        &self.current
    }

    fn take_err(&mut self) -> Option<io::Error> {
        self.fault.take()
    }
}

/// [`TemplateEngine`] failing at a chosen stage for one template.
#[derive(Debug, Clone)]
pub struct FailingEngine<E> {
    inner: E,
    template: &'static str,
    at_parse: bool,
}

impl<E: TemplateEngine> FailingEngine<E> {
    /// Fails parsing of `template`, delegating everything else to `inner`.
    pub const fn at_parse(inner: E, template: &'static str) -> Self {
        Self {
            inner,
            template,
            at_parse: true,
        }
    }

    /// Fails execution of `template`, delegating everything else to `inner`.
    pub const fn at_execute(inner: E, template: &'static str) -> Self {
        Self {
            inner,
            template,
            at_parse: false,
        }
    }
}

impl<E: TemplateEngine> TemplateEngine for FailingEngine<E> {
    fn parse(&self, name: &str, text: &str) -> Result<Box<dyn TemplateExecutor>, TemplateError> {
        if name != self.template {
            return self.inner.parse(name, text);
        }
        if self.at_parse {
            return Err(TemplateError::new("parse error"));
        }
        Ok(Box::new(FailingExecutor))
    }
}

struct FailingExecutor;

impl TemplateExecutor for FailingExecutor {
    fn execute(&self, _: &mut dyn Write, _: &TemplateContext) -> Result<(), TemplateError> {
        Err(TemplateError::new("execute error"))
    }
}

/// [`SourceFormatter`] that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingFormatter;

impl SourceFormatter for FailingFormatter {
    fn format(&self, _: &str) -> Result<String, FormatError> {
        Err(FormatError::new("source error"))
    }
}
