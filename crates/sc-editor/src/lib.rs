//! Declarative editor forms for addon content types.
//!
//! Content types contributed by addons describe their admin editing form as
//! data: a [`Form`] made of [`Field`]s (single-line input, multi-line
//! textarea, checkbox group), each with a label and placeholder/help
//! attributes. The host's admin UI receives the rendered
//! HTML fragment produced by [`Form::render`].
//!
//! # Example
//!
//! ```
//! use sc_editor::{Field, Form};
//!
//! let html = Form::new("Note")
//!     .field(Field::input("title", "Hello").label("Title"))
//!     .field(Field::checkbox("pinned", false, [("true", "Yes")]).label("Pinned"))
//!     .render()
//!     .unwrap();
//!
//! assert!(String::from_utf8(html).unwrap().contains(r#"name="title""#));
//! ```

mod form;
mod html;

pub use form::{Editable, EditorError, Field, Form};
pub use html::escape_html;
