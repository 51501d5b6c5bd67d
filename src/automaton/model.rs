use super::{StateId, TransitionId};
use std::fmt;

/// Represents a single element of the alphabet of the automaton, or the
/// epsilon marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// Regular input to the automaton.
    Symbol(char),
    /// Epsilon input, meaning no input needed (the transition can be made at
    /// any time).
    Eps,
}

/// A state in the automaton.
///
/// Note (state identity): states can only be created through the
/// [`AutomatonBuilder`], which hands out ids from a single arena. Two states
/// with identical flags are still distinct states; everything downstream
/// compares ids, never flag values.
#[derive(Debug, Clone)]
pub(super) struct State {
    /// Whether simulation threads are seeded on this state.
    pub(super) start: bool,
    /// Whether the state is accepting.
    pub(super) accepting: bool,
}

/// A directed edge `(from, to, input)`.
///
/// The editor's start arrows, self links and plain links all collapse into
/// this one record: a self loop is `from == to`, a start arrow lives on the
/// state as its `start` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub input: Input,
}

/// The automaton graph: an arena of states and labeled transitions between
/// them.
///
/// The graph is owned by the editor and only borrowed by the simulation; it
/// answers transition queries but holds no simulation state itself.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub(super) states: Vec<State>,
    pub(super) transitions: Vec<Transition>,
}

impl Automaton {
    /// Creates a builder which is used to construct an automaton.
    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::new()
    }

    /// Returns an iterator over the ids of all transitions leaving `state` on
    /// `input`.
    ///
    /// A state without matching transitions, or an id that does not name a
    /// state at all, yields an empty iterator. Detached states fail soft.
    pub fn transitions_from(
        &self,
        state: StateId,
        input: Input,
    ) -> impl Iterator<Item = TransitionId> + '_ {
        self.transitions
            .iter()
            .enumerate()
            .filter(move |(_, transition)| transition.from == state && transition.input == input)
            .map(|(id, _)| id)
    }

    /// Returns a read-only reference to the `Transition` with the given id.
    ///
    /// # Panics
    ///
    /// When the [`TransitionId`] does not exist in the automaton.
    pub fn transition(&self, id: TransitionId) -> &Transition {
        self.transitions
            .get(id)
            .expect("requested transition does not exist")
    }

    /// Returns whether threads are seeded on the state. Unknown states are
    /// not start states.
    pub fn is_start(&self, state: StateId) -> bool {
        self.states.get(state).is_some_and(|s| s.start)
    }

    /// Returns whether the state is accepting. Unknown states do not accept.
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.states.get(state).is_some_and(|s| s.accepting)
    }

    /// Returns an iterator over the ids of all start states.
    pub fn start_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.start)
            .map(|(id, _)| id)
    }

    /// Returns an iterator over the ids of all accepting states.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.accepting)
            .map(|(id, _)| id)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Symbol(symbol) => write!(f, "{}", symbol),
            Input::Eps => write!(f, "ε"),
        }
    }
}

/// Error returned by [`AutomatonBuilder::build`] when a transition points at
/// a state that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildError {
    pub transition: TransitionId,
    pub state: StateId,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transition {} points at state {}, which does not exist",
            self.transition, self.state
        )
    }
}

impl std::error::Error for BuildError {}

/// Builder struct for the [`Automaton`].
#[derive(Debug, Default)]
pub struct AutomatonBuilder {
    states: Vec<State>,
    transitions: Vec<Transition>,
}

impl AutomatonBuilder {
    /// Creates a new empty [`AutomatonBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(mut self, start: bool, accepting: bool) -> Self {
        self.add_state(start, accepting);
        self
    }

    pub fn with_transition(mut self, from: StateId, to: StateId, input: Input) -> Self {
        self.add_transition(from, to, input);
        self
    }

    /// Adds a state and returns its id.
    pub fn add_state(&mut self, start: bool, accepting: bool) -> StateId {
        self.states.push(State { start, accepting });
        self.states.len() - 1
    }

    /// Adds a transition and returns its id. The endpoints are only checked
    /// on [`build`](Self::build), so transitions may be added before their
    /// states.
    pub fn add_transition(&mut self, from: StateId, to: StateId, input: Input) -> TransitionId {
        self.transitions.push(Transition { from, to, input });
        self.transitions.len() - 1
    }

    /// Builds the [`Automaton`].
    ///
    /// # Fails
    ///
    /// When a transition starts or ends in a state that does not exist.
    pub fn build(self) -> Result<Automaton, BuildError> {
        for (id, transition) in self.transitions.iter().enumerate() {
            for endpoint in [transition.from, transition.to] {
                if endpoint >= self.states.len() {
                    return Err(BuildError {
                        transition: id,
                        state: endpoint,
                    });
                }
            }
        }

        Ok(Automaton {
            states: self.states,
            transitions: self.transitions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Automaton, BuildError, Input};

    #[test]
    fn build_rejects_dangling_endpoint() {
        let error = Automaton::builder()
            .with_state(true, false)
            .with_transition(0, 3, Input::Symbol('a'))
            .build()
            .unwrap_err();

        assert_eq!(
            error,
            BuildError {
                transition: 0,
                state: 3
            }
        );
        assert_eq!(
            error.to_string(),
            "transition 0 points at state 3, which does not exist"
        );
    }

    #[test]
    fn transitions_from_filters_on_state_and_input() {
        let mut builder = Automaton::builder();
        let a = builder.add_state(true, false);
        let b = builder.add_state(false, true);
        let on_zero = builder.add_transition(a, b, Input::Symbol('0'));
        let eps = builder.add_transition(a, a, Input::Eps);
        builder.add_transition(b, a, Input::Symbol('0'));
        let automaton = builder.build().unwrap();

        assert_eq!(
            automaton
                .transitions_from(a, Input::Symbol('0'))
                .collect::<Vec<_>>(),
            [on_zero]
        );
        assert_eq!(
            automaton.transitions_from(a, Input::Eps).collect::<Vec<_>>(),
            [eps]
        );
        assert_eq!(
            automaton
                .transitions_from(a, Input::Symbol('1'))
                .count(),
            0
        );
        // a state id that does not exist yields nothing, not an error
        assert_eq!(automaton.transitions_from(17, Input::Eps).count(), 0);
    }

    #[test]
    fn start_and_accepting_queries_fail_soft() {
        let automaton = Automaton::builder()
            .with_state(true, false)
            .with_state(false, true)
            .build()
            .unwrap();

        assert!(automaton.is_start(0));
        assert!(automaton.is_accepting(1));
        assert!(!automaton.is_start(42));
        assert!(!automaton.is_accepting(42));
        assert_eq!(automaton.start_states().collect::<Vec<_>>(), [0]);
        assert_eq!(automaton.accepting_states().collect::<Vec<_>>(), [1]);
    }
}
