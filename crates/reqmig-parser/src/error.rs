//! Diagnostics produced while parsing diagram command documents.
//!
//! A [`Diagnostic`] carries a severity, an optional [`ErrorCode`], labeled
//! source spans and help text. Parsing returns them wrapped in a
//! [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use reqmig_parser::error::{Diagnostic, ErrorCode};
//! # use reqmig_parser::Span;
//!
//! let diag = Diagnostic::error("closing tag `</b>` does not match `<a>`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(7..10), "mismatched closing tag")
//!     .with_secondary_label(Span::new(0..3), "element opened here")
//!     .with_help("close `<a>` before its parent");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
