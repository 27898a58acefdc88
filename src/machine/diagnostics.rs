//! Reporting sink for non-fatal definition events.

use crate::core::{State, Transition};
use std::fmt;

/// Informational events raised while a machine's graph is being defined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic<S> {
    /// An existing edge was swapped for a fresh one.
    TransitionReplaced(Transition<S>),
    /// An edge that already had a guard received a new one.
    GuardReplaced(Transition<S>),
}

impl<S> Diagnostic<S> {
    pub fn transition(&self) -> &Transition<S> {
        match self {
            Self::TransitionReplaced(transition) | Self::GuardReplaced(transition) => transition,
        }
    }
}

impl<S: State> fmt::Display for Diagnostic<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransitionReplaced(transition) => write!(f, "transition replaced: {transition}"),
            Self::GuardReplaced(transition) => write!(f, "guard replaced: {transition}"),
        }
    }
}

/// Where a machine sends its [`Diagnostic`]s.
///
/// Any `Fn(&Diagnostic<S>)` closure is a sink.
pub trait DiagnosticSink<S: State> {
    fn report(&self, diagnostic: &Diagnostic<S>);
}

impl<S, F> DiagnosticSink<S> for F
where
    S: State,
    F: Fn(&Diagnostic<S>),
{
    fn report(&self, diagnostic: &Diagnostic<S>) {
        self(diagnostic)
    }
}

/// Logs diagnostics through `tracing` at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl<S: State> DiagnosticSink<S> for TracingSink {
    fn report(&self, diagnostic: &Diagnostic<S>) {
        let transition = diagnostic.transition();
        match diagnostic {
            Diagnostic::TransitionReplaced(_) => tracing::info!(
                from = transition.from.name(),
                to = transition.to.name(),
                "transition replaced"
            ),
            Diagnostic::GuardReplaced(_) => tracing::info!(
                from = transition.from.name(),
                to = transition.to.name(),
                "guard replaced"
            ),
        }
    }
}

/// Discards every diagnostic.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl<S: State> DiagnosticSink<S> for SilentSink {
    fn report(&self, _diagnostic: &Diagnostic<S>) {}
}
