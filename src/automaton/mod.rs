pub use self::model::{Automaton, AutomatonBuilder, BuildError, Input, Transition};

/// Id of a state, used by transitions and simulation threads as a pointer
/// into the automaton.
pub type StateId = usize;

/// Id of a transition, handed to the renderer so it can position a thread
/// along the edge it is travelling.
pub type TransitionId = usize;

mod dot;
mod model;
