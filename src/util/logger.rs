use std::fmt::{Display, Formatter};

use super::Log;

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Verbose(s) => write!(f, "{}", s),
        }
    }
}

impl<T> Log<T> {
    /// Order of the log level; higher values are strictly more verbose.
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Verbose(_) => 2,
        }
    }
}

impl<TL: Display> Log<TL> {
    /// Print one trace line for a visited node, gated on debug builds and on this
    /// level being at least [Log::Default].
    pub fn trace_node(&self, depth: usize, node_kind: &str, comment: &str) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Default(()).order() {
            println!(
                "[{}]{}{}: {}",
                self,
                " ".repeat(depth * 2),
                node_kind,
                comment
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = (depth, node_kind, comment);
    }

    /// Print one trace line naming a freshly started or finished function.
    pub fn trace_function(&self, started: bool, name: &str) {
        #[cfg(debug_assertions)]
        if self.order() >= Log::Default(()).order() {
            println!(
                "[{}] {} func: {}",
                self,
                if started { "start" } else { "end" },
                name
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = (started, name);
    }
}
