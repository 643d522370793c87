//! sqlweave - SQL query templating with literal list joins

pub mod error;
pub mod join;
pub mod template;
pub mod trace;
pub mod value;

pub use error::{FixSuggestion, WeaveError};
pub use join::{join, render_literal, JOIN_DELIMITER};
pub use template::{render_template, tokenize, Template, Token};
pub use trace::{RequestContext, TraceInfo};
pub use value::{parse_args, Args, Value};
