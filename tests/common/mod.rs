//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use editbridge::{ActionInfo, Dispatcher, EditingContext, Engine, MemoryHost};

/// One engine call, as seen from inside the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub action: String,
    pub index: usize,
    pub caret: Option<usize>,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

fn record(log: &CallLog, action: &str, ctx: &EditingContext<'_>) {
    log.borrow_mut().push(Call {
        action: action.to_string(),
        index: ctx.selection_index(),
        caret: ctx.caret_pos().ok(),
    });
}

/// Inserts a fixed string at the caret of every selection it runs against
pub struct InsertingEngine {
    pub text: String,
    pub log: CallLog,
}

impl InsertingEngine {
    pub fn new(text: &str) -> (Self, CallLog) {
        let log = CallLog::default();
        (
            Self {
                text: text.to_string(),
                log: log.clone(),
            },
            log,
        )
    }
}

impl Engine for InsertingEngine {
    fn run(&self, action: &str, ctx: &mut EditingContext<'_>) -> anyhow::Result<bool> {
        record(&self.log, action, ctx);
        let caret = ctx.caret_pos()?;
        ctx.replace_content(&self.text, Some(caret), None, true)?;
        Ok(true)
    }

    fn actions(&self) -> Vec<ActionInfo> {
        vec![ActionInfo::new("expand_abbreviation")]
    }
}

/// Behaves like `InsertingEngine` but fails on the listed (1-based) calls
pub struct FlakyEngine {
    pub inner: InsertingEngine,
    pub fail_on: Vec<usize>,
    calls: Cell<usize>,
}

impl FlakyEngine {
    pub fn new(text: &str, fail_on: &[usize]) -> (Self, CallLog) {
        let (inner, log) = InsertingEngine::new(text);
        (
            Self {
                inner,
                fail_on: fail_on.to_vec(),
                calls: Cell::new(0),
            },
            log,
        )
    }
}

impl Engine for FlakyEngine {
    fn run(&self, action: &str, ctx: &mut EditingContext<'_>) -> anyhow::Result<bool> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if self.fail_on.contains(&call) {
            record(&self.inner.log, action, ctx);
            anyhow::bail!("engine blew up on call {}", call);
        }
        self.inner.run(action, ctx)
    }

    fn actions(&self) -> Vec<ActionInfo> {
        self.inner.actions()
    }
}

/// Returns a fixed answer without touching the document
pub struct ScriptedEngine {
    pub answer: bool,
    pub syntaxes: Option<Vec<String>>,
    pub log: CallLog,
}

impl ScriptedEngine {
    pub fn new(answer: bool) -> (Self, CallLog) {
        let log = CallLog::default();
        (
            Self {
                answer,
                syntaxes: None,
                log: log.clone(),
            },
            log,
        )
    }

    /// Only report support for the given syntaxes
    pub fn supporting(mut self, syntaxes: &[&str]) -> Self {
        self.syntaxes = Some(syntaxes.iter().map(|s| s.to_string()).collect());
        self
    }
}

impl Engine for ScriptedEngine {
    fn run(&self, action: &str, ctx: &mut EditingContext<'_>) -> anyhow::Result<bool> {
        record(&self.log, action, ctx);
        Ok(self.answer)
    }

    fn actions(&self) -> Vec<ActionInfo> {
        Vec::new()
    }

    fn supports_syntax(&self, syntax: &str) -> bool {
        match &self.syntaxes {
            Some(list) => list.iter().any(|s| s == syntax),
            None => true,
        }
    }
}

/// Dispatcher over `engine` with default tables
pub fn dispatcher(engine: impl Engine + 'static) -> Dispatcher {
    Dispatcher::new(Box::new(engine))
}

/// Host with carets at each of `offsets`
pub fn host_with_carets(text: &str, offsets: &[usize]) -> MemoryHost {
    let pairs: Vec<(usize, usize)> = offsets.iter().map(|&o| (o, o)).collect();
    MemoryHost::new(text).with_offset_selections(&pairs)
}
