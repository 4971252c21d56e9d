//! Generic table engines
//!
//! Entity-agnostic building blocks shared by every resource tab:
//! - Field descriptors and validated column sets
//! - The row abstraction and its JSON-backed record
//! - Filter store, sort controller and page state
//! - The editable table and the add-row form
//!
//! Nothing in here performs I/O. Engines return action values and the
//! owning container decides how (and whether) to run them.

pub mod add_form;
pub mod editable;
pub mod field;
pub mod filter;
pub mod pagination;
pub mod record;
pub mod sort;

pub use add_form::{AddForm, FormField};
pub use editable::{CellMode, EditableTable, TableAction};
pub use field::{
    is_hex_color, Columns, ColumnsError, FieldDescriptor, FieldKind, FieldValueError, SelectOption,
};
pub use filter::FilterStore;
pub use pagination::PageState;
pub use record::{Record, Row};
pub use sort::SortState;
