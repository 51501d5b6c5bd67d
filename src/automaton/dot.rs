use super::model::Automaton;

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dot())
    }
}

impl Automaton {
    /// Converts the automaton to the [graphviz](https://graphviz.org/docs/layouts/dot/)
    /// dot language format.
    pub fn to_dot(&self) -> String {
        let accepting_dot = format!(
            "node [shape = doublecircle]; {}",
            self.accepting_states()
                .map(|id| id.to_string())
                .collect::<Vec<String>>()
                .join(" ")
        );

        let start_dot = self
            .start_states()
            .map(|id| format!("start{0} [shape = point];\n\tstart{0} -> {0};", id))
            .collect::<Vec<String>>()
            .join("\n\t");

        format!(
            "digraph nfa {{\n\
                \trankdir = LR;\n\
            \n\
                \t// accepting states\n\
                \t{}\n\
                \tnode [shape = circle];\n\
            \n\
                \t// start arrows\n\
                \t{}\n\
            \n\
                {}\n\
            }}",
            accepting_dot,
            start_dot,
            self.transition_dot()
                .map(|l| format!("\t{}", l))
                .collect::<Vec<String>>()
                .join("\n")
        )
    }

    /// Converts the transitions to the dot format and returns an iterator
    /// over it.
    fn transition_dot(&self) -> impl Iterator<Item = String> + '_ {
        self.transitions
            .iter()
            .map(|t| format!("{} -> {} [label = \"{}\"];", t.from, t.to, t.input))
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::{Automaton, Input};

    #[test]
    fn to_dot() {
        let mut builder = Automaton::builder();
        let a = builder.add_state(true, false);
        let b = builder.add_state(false, true);
        builder.add_transition(a, b, Input::Symbol('a'));
        builder.add_transition(b, b, Input::Eps);
        let automaton = builder.build().unwrap();

        let dot = automaton.to_dot();
        assert!(dot.contains("node [shape = doublecircle]; 1"));
        assert!(dot.contains("start0 -> 0;"));
        assert!(dot.contains("0 -> 1 [label = \"a\"];"));
        assert!(dot.contains("1 -> 1 [label = \"ε\"];"));
    }
}
