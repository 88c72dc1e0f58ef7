mod logger;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// A level of debug tracing for the processor and generator.
///
/// Mirrors the [Log] level used for lexeme/production tracing: [Log::None] disables
/// tracing entirely, [Log::Default] prints a line per visited node, and [Log::Verbose]
/// additionally prints the active `Match` mode and current function name.
pub enum Log<T> {
    None,
    Default(T),
    Verbose(T),
}
