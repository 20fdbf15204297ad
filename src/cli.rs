//! CLI domain: parse, route and output only.

mod output;
mod parse;
mod route;

pub use output::{exit_code, map_error, EXIT_DIFFERENT, EXIT_SAME, EXIT_TROUBLE};
pub use parse::{parse_threshold, Cli};
pub use route::RunContext;
