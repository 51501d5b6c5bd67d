pub use automaton::{
    Automaton, AutomatonBuilder, BuildError, Input, StateId, Transition, TransitionId,
};
pub use sim::{Simulation, Status, Thread, ThreadView};

mod automaton;
mod sim;
