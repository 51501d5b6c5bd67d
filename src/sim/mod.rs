use crate::automaton::{Automaton, Input, StateId, TransitionId};
use std::collections::{HashMap, HashSet};
use tracing::trace;


/// Aggregate outcome of a simulation, derived from its current thread set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// At least one thread is alive and none of them accepts yet.
    Running,
    /// Some thread sits on an accepting state with no input left.
    Accept,
    /// Every thread has dead-ended.
    Reject,
}

/// One candidate execution path through the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thread {
    /// State the thread currently occupies.
    pub state: StateId,
    /// Index of the first unconsumed input symbol; the remaining input is the
    /// suffix of the simulation input starting here.
    pub pos: usize,
    /// Transition last taken to reach `state`, `None` for seeded threads that
    /// have not moved yet. Kept for presentation only; the simulation itself
    /// never reads it.
    pub via: Option<TransitionId>,
}

/// Presentation view of a live [`Thread`], handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadView<'a> {
    pub thread: Thread,
    /// Input the thread has yet to consume.
    pub remaining: &'a [char],
    /// Disambiguates threads that share a destination state (and therefore
    /// possibly an edge), so the renderer can offset their glyphs instead of
    /// drawing them on top of each other.
    pub lane: usize,
}

impl ThreadView<'_> {
    /// Renders the remaining input the way the editor draws it next to a
    /// node.
    pub fn remaining_text(&self) -> String {
        self.remaining.iter().collect()
    }
}

/// Simulates an [`Automaton`] against an input string, one generation per
/// step.
///
/// The automaton is borrowed for the lifetime of the simulation; editing the
/// graph means discarding the simulation and constructing a new one.
pub struct Simulation<'a> {
    /// Automaton we are simulating.
    automaton: &'a Automaton,
    /// Full input; threads index into it instead of owning their remaining
    /// suffix.
    input: Vec<char>,
    /// The threads the simulation is currently in.
    threads: Vec<Thread>,
}

impl<'a> Simulation<'a> {
    /// Creates a simulation with one thread seeded per start state, each
    /// carrying the full input.
    ///
    /// An automaton without start states seeds no threads and immediately
    /// reads as [`Status::Reject`].
    pub fn new(automaton: &'a Automaton, input: &str) -> Self {
        let mut sim = Self {
            automaton,
            input: input.chars().collect(),
            threads: Vec::new(),
        };
        sim.reset();
        sim
    }

    /// Drops the current threads and re-seeds them as at construction.
    pub fn reset(&mut self) {
        self.threads = self
            .automaton
            .start_states()
            .map(|state| Thread {
                state,
                pos: 0,
                via: None,
            })
            .collect();

        trace!(threads = self.threads.len(), "seeded simulation");
    }

    /// Advances every thread by one generation.
    ///
    /// Each thread takes every epsilon transition leaving its state (a single
    /// hop, not the transitive closure; a chain of epsilon edges plays out
    /// over as many steps) and, when it still has input left, every
    /// transition consuming the next symbol. Threads with no move to make
    /// vanish. The emitted set replaces the old one wholesale, after
    /// collapsing threads that reached the same state with the same remaining
    /// input.
    pub fn step(&mut self) {
        let mut emitted = Vec::new();

        for &Thread { state, pos, .. } in &self.threads {
            // epsilon transitions move the thread without touching its input
            for id in self.automaton.transitions_from(state, Input::Eps) {
                emitted.push(Thread {
                    state: self.automaton.transition(id).to,
                    pos,
                    via: Some(id),
                });
            }

            // consuming transitions need a next symbol to match
            let Some(&symbol) = self.input.get(pos) else {
                continue;
            };
            for id in self.automaton.transitions_from(state, Input::Symbol(symbol)) {
                emitted.push(Thread {
                    state: self.automaton.transition(id).to,
                    pos: pos + 1,
                    via: Some(id),
                });
            }
        }

        trace!(
            live = self.threads.len(),
            emitted = emitted.len(),
            "advancing one generation"
        );

        self.threads = deduplicate(emitted);
    }

    /// Returns the status of the simulation as derived from the current
    /// thread set. Pure query; an accepting seed reports
    /// [`Status::Accept`] before any step is taken.
    pub fn status(&self) -> Status {
        // a thread accepts when it sits on an accepting state with no input
        // left to consume
        if self
            .threads
            .iter()
            .any(|t| t.pos == self.input.len() && self.automaton.is_accepting(t.state))
        {
            Status::Accept
        } else if self.threads.is_empty() {
            Status::Reject
        } else {
            Status::Running
        }
    }

    /// Steps until the simulation leaves [`Status::Running`], taking at most
    /// `fuel` steps, and returns the status reached.
    ///
    /// Epsilon cycles can keep a thread alive forever without consuming
    /// input, so an unbounded run need not terminate; when the fuel runs out
    /// the returned status is still [`Status::Running`].
    pub fn run(&mut self, fuel: usize) -> Status {
        for _ in 0..fuel {
            if self.status() != Status::Running {
                break;
            }
            self.step();
        }

        self.status()
    }

    /// The input the simulation was constructed with.
    pub fn input(&self) -> &[char] {
        &self.input
    }

    /// The live threads, in a deterministic order.
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Returns the live threads dressed up for rendering: remaining input as
    /// a slice and a lane index for offsetting overlapping glyphs.
    ///
    /// Lane numbering restarts on every call; it is derived from the thread
    /// order, never stored, so rendering cannot leak state back into the
    /// simulation.
    pub fn thread_views(&self) -> Vec<ThreadView<'_>> {
        let mut lanes: HashMap<StateId, usize> = HashMap::new();

        self.threads
            .iter()
            .map(|&thread| {
                let lane = lanes.entry(thread.state).or_insert(0);
                let view = ThreadView {
                    thread,
                    remaining: &self.input[thread.pos..],
                    lane: *lane,
                };
                *lane += 1;
                view
            })
            .collect()
    }
}

/// Collapses threads that reached the same state with the same remaining
/// input.
///
/// Threads only ever carry suffixes of the one shared input, so equal
/// positions mean element-wise equal remaining input. The first emission
/// wins, which keeps the surviving `via` edge deterministic.
fn deduplicate(threads: Vec<Thread>) -> Vec<Thread> {
    let mut seen = HashSet::with_capacity(threads.len());
    let threads: Vec<Thread> = threads
        .into_iter()
        .filter(|t| seen.insert((t.state, t.pos)))
        .collect();

    debug_assert_eq!(seen.len(), threads.len());
    threads
}
