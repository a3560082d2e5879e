//! Action dispatch: run an engine action once, or once per selection, inside
//! one host batch.
//!
//! The dispatcher never lets an engine fault escape. Each iteration ends in an
//! [`IterationResult`]; the dispatch as a whole ends in an [`Outcome`] telling
//! the host whether to run its own default handling for the key.

pub mod actions;

use crate::adapter::{literal_escape, DefaultDetector, Detector, EditingContext, EscapeFn, SyntaxTable};
use crate::config::BridgeConfig;
use crate::engine::Engine;
use crate::error::AdapterError;
use crate::host::Host;
use crate::tracing::SelectionSnapshot;

pub use actions::{ActionMode, ActionTable, PassRules, EXPAND_WITH_TAB, FORMATTED_LINE_BREAK};

/// What the host should do after a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action consumed the input
    Handled,
    /// The host should apply its default behavior for the input
    Deferred,
}

/// Result of one engine run against one selection
#[derive(Debug)]
pub enum IterationResult {
    /// The engine ran; `true` if it performed the action
    Done(bool),
    /// Hand the input back to the host and stop iterating
    Pass,
    /// The engine failed; the dispatch carried on
    EngineFault(anyhow::Error),
    /// The selection index was invalid; nothing ran
    Skipped(AdapterError),
}

impl IterationResult {
    pub fn succeeded(&self) -> bool {
        matches!(self, IterationResult::Done(true))
    }
}

/// Everything that happened during one dispatch
#[derive(Debug)]
pub struct DispatchReport {
    pub action: String,
    pub mode: ActionMode,
    pub outcome: Outcome,
    pub iterations: Vec<IterationResult>,
}

impl DispatchReport {
    /// Number of iterations that ended in an engine fault
    pub fn faults(&self) -> usize {
        self.iterations
            .iter()
            .filter(|r| matches!(r, IterationResult::EngineFault(_)))
            .count()
    }

    /// Number of iterations in which the engine performed the action
    pub fn succeeded(&self) -> usize {
        self.iterations.iter().filter(|r| r.succeeded()).count()
    }
}

/// Drives engine actions against a host.
pub struct Dispatcher {
    engine: Box<dyn Engine>,
    detector: Box<dyn Detector>,
    syntaxes: SyntaxTable,
    actions: ActionTable,
    escape: Box<EscapeFn>,
    default_profile: Option<String>,
}

impl Dispatcher {
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self {
            engine,
            detector: Box::new(DefaultDetector),
            syntaxes: SyntaxTable::default(),
            actions: ActionTable::default(),
            escape: Box::new(literal_escape),
            default_profile: None,
        }
    }

    /// Dispatcher with the user's mode table, profile and action overrides
    pub fn from_config(engine: Box<dyn Engine>, config: &BridgeConfig) -> Self {
        let mut dispatcher = Self::new(engine);
        dispatcher.syntaxes = SyntaxTable::with_extra(&config.modes);
        dispatcher.actions = ActionTable::with_single(&config.single_selection_actions);
        dispatcher.default_profile = config.default_profile.clone();
        dispatcher
    }

    pub fn with_detector(mut self, detector: Box<dyn Detector>) -> Self {
        self.detector = detector;
        self
    }

    /// Engine-specific handling of backslash escapes in tab-stop text
    pub fn with_escape(mut self, escape: Box<EscapeFn>) -> Self {
        self.escape = escape;
        self
    }

    pub fn mode(&self, action: &str) -> ActionMode {
        self.actions.mode(action)
    }

    pub fn engine(&self) -> &dyn Engine {
        &*self.engine
    }

    /// Run `action` against the host as one atomic edit.
    ///
    /// Per-selection actions run once for each selection present when the
    /// dispatch starts, in host order; each iteration re-reads the offsets,
    /// so earlier edits are already reflected. A pass-through stops the loop.
    pub fn dispatch(&self, action: &str, host: &mut dyn Host) -> DispatchReport {
        let mode = self.actions.mode(action);
        let rules = self.actions.pass_rules(action);
        let _span = tracing::debug_span!("dispatch", action, %mode).entered();

        let before = SelectionSnapshot::capture(&*host);
        let count = match mode {
            ActionMode::Single => 1,
            ActionMode::PerSelection => before.ranges.len(),
        };

        host.begin_batch();
        let mut iterations = Vec::with_capacity(count);
        {
            let mut ctx = EditingContext::new(&mut *host)
                .with_detector(&*self.detector)
                .with_syntax_table(&self.syntaxes)
                .with_escape(&*self.escape)
                .with_default_profile(self.default_profile.as_deref());

            for index in 0..count {
                ctx.set_selection_index(index);
                let result = self.run_once(action, rules, &mut ctx);
                tracing::debug!(index, ?result, "iteration finished");

                let pass = matches!(result, IterationResult::Pass);
                iterations.push(result);
                if pass {
                    break;
                }
            }
        }
        host.end_batch();

        let outcome = if iterations
            .iter()
            .any(|r| matches!(r, IterationResult::Pass))
        {
            Outcome::Deferred
        } else if iterations.iter().any(IterationResult::succeeded) {
            Outcome::Handled
        } else {
            Outcome::Deferred
        };

        let after = SelectionSnapshot::capture(&*host);
        if let Some(diff) = before.diff(&after) {
            tracing::debug!(%diff, "selections changed");
        }
        tracing::debug!(?outcome, iterations = iterations.len(), "dispatch finished");

        DispatchReport {
            action: action.to_string(),
            mode,
            outcome,
            iterations,
        }
    }

    fn run_once(
        &self,
        action: &str,
        rules: PassRules,
        ctx: &mut EditingContext<'_>,
    ) -> IterationResult {
        if rules.when_selected && ctx.has_selection() {
            return IterationResult::Pass;
        }
        if rules.when_unsupported_syntax && !self.engine.supports_syntax(&ctx.syntax()) {
            return IterationResult::Pass;
        }

        if let Err(err) = ctx.selection_range() {
            tracing::error!(%err, "skipping iteration");
            return IterationResult::Skipped(err);
        }

        match self.engine.run(action, ctx) {
            Ok(false) if rules.when_not_performed => IterationResult::Pass,
            Ok(performed) => IterationResult::Done(performed),
            Err(fault) => {
                if let Some(err) = fault.downcast_ref::<AdapterError>() {
                    tracing::error!(%err, "engine hit an adapter error");
                } else {
                    tracing::warn!("engine fault in {}: {:#}", action, fault);
                }
                IterationResult::EngineFault(fault)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ActionInfo;
    use crate::host::MemoryHost;

    /// Inserts "X" at each caret
    struct Marker;

    impl Engine for Marker {
        fn run(&self, _action: &str, ctx: &mut EditingContext<'_>) -> anyhow::Result<bool> {
            let caret = ctx.caret_pos()?;
            ctx.replace_content("X", Some(caret), None, true)?;
            Ok(true)
        }

        fn actions(&self) -> Vec<ActionInfo> {
            vec![ActionInfo::new("expand_abbreviation")]
        }
    }

    fn marker() -> Box<Marker> {
        Box::new(Marker)
    }

    #[test]
    fn test_single_mode_runs_once() {
        let dispatcher = Dispatcher::new(marker());
        let mut host = MemoryHost::new("ab").with_offset_selections(&[(0, 0), (1, 1)]);

        let report = dispatcher.dispatch("merge_lines", &mut host);
        assert_eq!(report.mode, ActionMode::Single);
        assert_eq!(report.iterations.len(), 1);
        assert_eq!(report.outcome, Outcome::Handled);
        assert_eq!(host.text(), "Xab");
    }

    #[test]
    fn test_batch_is_balanced() {
        let dispatcher = Dispatcher::new(marker());
        let mut host = MemoryHost::new("a\nb").with_offset_selections(&[(0, 0), (2, 2)]);

        dispatcher.dispatch("expand_abbreviation", &mut host);
        assert_eq!(host.batch_depth(), 0);
        assert_eq!(host.undo_count(), 1);
        assert_eq!(host.layout_count(), 1);
    }

    #[test]
    fn test_config_overrides_mode() {
        let config = BridgeConfig {
            single_selection_actions: vec!["expand_abbreviation".to_string()],
            ..BridgeConfig::default()
        };
        let dispatcher = Dispatcher::from_config(marker(), &config);
        assert_eq!(dispatcher.mode("expand_abbreviation"), ActionMode::Single);
    }

    #[test]
    fn test_report_counts() {
        let report = DispatchReport {
            action: "x".to_string(),
            mode: ActionMode::PerSelection,
            outcome: Outcome::Handled,
            iterations: vec![
                IterationResult::Done(true),
                IterationResult::EngineFault(anyhow::anyhow!("boom")),
                IterationResult::Done(false),
            ],
        };
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.faults(), 1);
    }
}
