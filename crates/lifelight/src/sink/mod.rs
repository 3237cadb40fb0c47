//! Frame destinations.

mod headless;
mod terminal;

pub use headless::HeadlessSink;
pub use terminal::TerminalSink;
