//! Value types held by the settings service.
//!
//! Types are organized into domain-specific sub-modules:
//! - `font`: font style/weight, font variants and the effective-font resolver
//! - `text`: line endings, wrapping, tab indentation, web search engine
//! - `encoding`: code-page backed text encodings

pub mod encoding;
pub mod font;
pub mod text;

pub use encoding::{DETECT_CODE_PAGE, TextEncoding, UTF8_CODE_PAGE, encoding_for_code_page};
pub use font::{FontStyle, FontVariant, FontWeight, resolve_font};
pub use text::{LineEnding, SearchEngine, TabIndents, TextWrapping};
