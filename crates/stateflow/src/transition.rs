//! Declarative transition definitions.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A guard condition evaluated against the caller's context before a
/// transition is applied.
pub type Guard<C> = Box<dyn Fn(&C) -> bool + Send + Sync>;

/// Which states a transition may be invoked from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec<S> {
    /// An explicit set of source states.
    States(Vec<S>),
    /// Any state.
    Any,
    /// Any state except the transition's own target.
    AnyButTarget,
}

/// Which state a transition lands in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec<S> {
    State(S),
    /// A validated no-op: the transition fires but leaves the state as-is.
    Unchanged,
}

/// A single declared transition: name, source set, target, guards, and the
/// per-state denial message table consulted when the transition is invoked
/// from a state outside its source set.
pub struct Transition<S, C> {
    name: String,
    sources: SourceSpec<S>,
    target: TargetSpec<S>,
    guards: Vec<Guard<C>>,
    denials: HashMap<S, String>,
    fallback: Option<S>,
}

impl<S, C> Transition<S, C>
where
    S: Clone + Eq + Hash + fmt::Debug + fmt::Display,
{
    /// Start declaring a transition. Defaults to an empty source set and an
    /// unchanged target; a source set must be supplied before the owning
    /// workflow will accept it.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: SourceSpec::States(Vec::new()),
            target: TargetSpec::Unchanged,
            guards: Vec::new(),
            denials: HashMap::new(),
            fallback: None,
        }
    }

    /// Declare the explicit source states this transition accepts.
    pub fn sources(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.sources = SourceSpec::States(states.into_iter().collect());
        self
    }

    /// Accept invocation from any state.
    pub fn any_source(mut self) -> Self {
        self.sources = SourceSpec::Any;
        self
    }

    /// Accept invocation from any state except the target itself.
    pub fn any_source_but_target(mut self) -> Self {
        self.sources = SourceSpec::AnyButTarget;
        self
    }

    /// Declare the target state.
    pub fn target(mut self, state: S) -> Self {
        self.target = TargetSpec::State(state);
        self
    }

    /// Declare a validated no-op: the transition fires without changing
    /// state.
    pub fn stay(mut self) -> Self {
        self.target = TargetSpec::Unchanged;
        self
    }

    /// Add a guard condition. All guards must pass for the transition to
    /// proceed.
    pub fn guard(mut self, f: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        self.guards.push(Box::new(f));
        self
    }

    /// Set the denial message reported when this transition is invoked
    /// while the machine sits in `state`.
    pub fn deny_message(mut self, state: S, message: impl Into<String>) -> Self {
        self.denials.insert(state, message.into());
        self
    }

    /// State to land in when the action passed to `trigger_with` fails.
    pub fn on_failure(mut self, state: S) -> Self {
        self.fallback = Some(state);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_spec(&self) -> &SourceSpec<S> {
        &self.sources
    }

    pub fn target_spec(&self) -> &TargetSpec<S> {
        &self.target
    }

    pub fn fallback_state(&self) -> Option<&S> {
        self.fallback.as_ref()
    }

    /// Whether this transition may be invoked from `state`.
    pub fn admits(&self, state: &S) -> bool {
        match (&self.sources, &self.target) {
            (SourceSpec::States(states), _) => states.contains(state),
            (SourceSpec::Any, _) => true,
            (SourceSpec::AnyButTarget, TargetSpec::State(target)) => state != target,
            // Rejected at build time; admit nothing if it slips through.
            (SourceSpec::AnyButTarget, TargetSpec::Unchanged) => false,
        }
    }

    /// Whether every guard accepts the context.
    pub fn guards_pass(&self, ctx: &C) -> bool {
        self.guards.iter().all(|guard| guard(ctx))
    }

    /// Resolve the denial message for an invocation from `state`: the
    /// per-state table entry if present, the default otherwise.
    pub fn denial_message(&self, state: &S) -> String {
        match self.denials.get(state) {
            Some(message) => message.clone(),
            None => format!(
                "cannot invoke transition '{}' from state '{}'",
                self.name, state
            ),
        }
    }

    /// The state this transition lands in when fired from `current`.
    pub fn target_state(&self, current: &S) -> S {
        match &self.target {
            TargetSpec::State(state) => state.clone(),
            TargetSpec::Unchanged => current.clone(),
        }
    }

    pub(crate) fn has_empty_sources(&self) -> bool {
        match (&self.sources, &self.target) {
            (SourceSpec::States(states), _) => states.is_empty(),
            (SourceSpec::AnyButTarget, TargetSpec::Unchanged) => true,
            _ => false,
        }
    }
}

impl<S: fmt::Debug, C> fmt::Debug for Transition<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.name)
            .field("sources", &self.sources)
            .field("target", &self.target)
            .field("guards", &self.guards.len())
            .field("denials", &self.denials)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl<S: fmt::Display, C> fmt::Display for Transition<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.sources, self.target)
    }
}

impl<S: fmt::Display> fmt::Display for SourceSpec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::States(states) => {
                for (i, state) in states.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", state)?;
                }
                Ok(())
            }
            SourceSpec::Any => write!(f, "*"),
            SourceSpec::AnyButTarget => write!(f, "+"),
        }
    }
}

impl<S: fmt::Display> fmt::Display for TargetSpec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::State(state) => write!(f, "{}", state),
            TargetSpec::Unchanged => write!(f, "(unchanged)"),
        }
    }
}
