//! Core library for the SCUM `parameters.json` editor.
//! Decodes the spawn-parameter records into typed form, filters and navigates them by
//! identifier, and writes them back while leaving the rest of the document untouched.

mod document;
pub mod filter;
mod gui;
pub mod record;
mod session;
pub mod settings;
pub mod statics;
mod value;

pub use document::{LineEnding, ParamsDocument};
pub use filter::{Direction, FilterState, RecordListView};
pub use gui::run_gui;
pub use record::{Field, FieldKind, FieldValue, FormatError, Record, SchemaError};
pub use session::Session;
pub use settings::Settings;
pub use value::{JsonNumber, JsonValue};
