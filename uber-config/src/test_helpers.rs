//! In-memory stand-ins for the collaborators `ConfigManager` depends on.
//!
//! Each double is a cheap handle over shared state, so a test can hand one
//! clone to the manager and keep another to inspect what happened.

// Standard library
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

// External crates
use uber_core::error::{Result, UberError};
use uber_core::file_system::FileAccess;
use uber_core::prompt::{Prompter, Validator};

// Internal imports
use crate::raw::RawDocument;
use crate::store::{parse_document, DocumentStore};

#[derive(Debug, Default)]
struct MemoryState {
    document: Option<RawDocument>,
    reads: usize,
    writes: usize,
    fail_writes: bool,
}

/// `DocumentStore` kept in memory.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    path: PathBuf,
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryStore {
    pub fn empty() -> Self {
        Self {
            path: PathBuf::from("memory://uberstead.yaml"),
            state: Rc::default(),
        }
    }

    pub fn with_yaml(yaml: &str) -> Self {
        let store = Self::empty();
        store.state.borrow_mut().document =
            Some(parse_document(yaml).expect("test document should be valid YAML"));
        store
    }

    pub fn document(&self) -> Option<RawDocument> {
        self.state.borrow().document.clone()
    }

    pub fn reads(&self) -> usize {
        self.state.borrow().reads
    }

    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    /// Make every following write fail with a persistence error.
    pub fn fail_writes(&self) {
        self.state.borrow_mut().fail_writes = true;
    }
}

impl DocumentStore for MemoryStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.state.borrow().document.is_some()
    }

    fn read(&self) -> Result<RawDocument> {
        let mut state = self.state.borrow_mut();
        state.reads += 1;
        state
            .document
            .clone()
            .ok_or_else(|| UberError::persistence(&self.path, "no document"))
    }

    fn write(&self, document: &RawDocument) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(UberError::persistence(&self.path, "disk full"));
        }
        state.writes += 1;
        state.document = Some(document.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCall {
    Chmod(PathBuf, u32),
    Chown(PathBuf, String),
}

/// `FileAccess` that records calls instead of touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct RecordingFileAccess {
    calls: Rc<RefCell<Vec<FileCall>>>,
}

impl RecordingFileAccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<FileCall> {
        self.calls.borrow().clone()
    }
}

impl FileAccess for RecordingFileAccess {
    fn chmod(&self, path: &Path, mode: u32) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(FileCall::Chmod(path.to_path_buf(), mode));
        Ok(())
    }

    fn chown(&self, path: &Path, user: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(FileCall::Chown(path.to_path_buf(), user.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Confirm(bool),
}

/// `Prompter` that replays queued answers.
///
/// An empty text answer takes the prompt's default. An answer rejected by
/// the validator is recorded and the next queued answer is tried, the way a
/// terminal prompt asks again.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: Rc<RefCell<VecDeque<Answer>>>,
    asked: Rc<RefCell<Vec<String>>>,
    rejected: Rc<RefCell<Vec<String>>>,
    headings: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Rc::new(RefCell::new(answers.into_iter().collect())),
            ..Self::default()
        }
    }

    pub fn text(answer: &str) -> Answer {
        Answer::Text(answer.to_string())
    }

    pub fn yes() -> Answer {
        Answer::Confirm(true)
    }

    pub fn no() -> Answer {
        Answer::Confirm(false)
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    /// Answers the validator turned down.
    pub fn rejected(&self) -> Vec<String> {
        self.rejected.borrow().clone()
    }

    /// Section titles shown so far.
    pub fn headings(&self) -> Vec<String> {
        self.headings.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, prompt: &str) -> Result<Answer> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers.borrow_mut().pop_front().ok_or_else(|| {
            UberError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("no scripted answer for '{}'", prompt),
            ))
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(
        &self,
        prompt: &str,
        default: Option<&str>,
        validator: Option<Validator<'_>>,
    ) -> Result<String> {
        loop {
            let answer = match self.next(prompt)? {
                Answer::Text(text) if text.is_empty() => default.unwrap_or_default().to_string(),
                Answer::Text(text) => text,
                Answer::Confirm(_) => {
                    return Err(UberError::Validation(format!(
                        "expected a text answer for '{}'",
                        prompt
                    )))
                }
            };

            match validator.map(|validate| validate(&answer)) {
                Some(Err(_)) => self.rejected.borrow_mut().push(answer),
                _ => return Ok(answer),
            }
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(answer) => Ok(answer),
            Answer::Text(text) if text.is_empty() => Ok(default),
            Answer::Text(text) => Ok(matches!(text.to_lowercase().as_str(), "y" | "yes")),
        }
    }

    fn heading(&self, title: &str) {
        self.headings.borrow_mut().push(title.to_string());
    }
}
