#![warn(clippy::pedantic)]
// Noisy doc/signature lints — would require annotating most pub functions
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
// Style preference — keeping format!("{}", x) over format!("{x}") for readability with complex exprs
#![allow(clippy::uninlined_format_args)]
// Module structure — our chat module has chat::ChatBackend pattern by design
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod errors;
pub mod scripted;
pub mod session;
pub(crate) mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const LOGO: &str = "\u{1f423}";
