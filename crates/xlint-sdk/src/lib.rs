pub mod extensions;
pub mod locate;
pub mod parse;
pub mod store;
pub mod validate;

pub use extensions::{
    attach_position, check_extensions, check_extensions_with_index, collect_targets,
    ExtensionTarget, BODY_METHODS, HTTP_METHODS,
};
pub use locate::{locate, LineIndex};
pub use parse::{parse_document, parse_document_with_format, DocumentFormat, ParseError, ParsedDocument};
pub use store::RuleStore;
pub use validate::{validate, validate_with_options, ValidateOptions, Validator};
