//! # Reqmig Parser
//!
//! Parser for the drawing-command documents embedded in legacy artifacts.
//! A document is parsed into an [`Element`] tree; each element can then be
//! classified as a [`Command`].
//!
//! ## Usage
//!
//! ```
//! # use reqmig_parser::{parse, Command, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let root = parse(r#"<diagram><rect x="1" y="2" w="3" h="4"/></diagram>"#)?;
//!     let commands: Vec<_> = root.children().iter().filter_map(Command::from_element).collect();
//!     assert_eq!(commands.len(), 1);
//!     Ok(())
//! }
//! ```

mod command;
mod element;
pub mod error;
mod markup;
mod span;

pub use command::Command;
pub use element::{Attribute, Descendants, Element};
pub use error::ParseError;
pub use span::Span;

use log::trace;

/// Parse a command document into its root element.
///
/// # Errors
///
/// Returns a [`ParseError`] when the markup is malformed: a mismatched or
/// missing closing tag, an unterminated attribute value or declaration, no
/// root element, or content after the root element.
pub fn parse(source: &str) -> Result<Element, ParseError> {
    let root = markup::parse_document(source)?;
    trace!(root = root.name(), elements = root.iter().count(); "Parsed command document");
    Ok(root)
}
