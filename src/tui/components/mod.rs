// Components module - reusable UI building blocks
//
// Shell components are rendered on every page:
// - Title bar: resource tabs
// - Status bar: page state and key hints
//
// Page components:
// - Table view, pager, add-row form

pub mod form_view;
pub mod pager;
pub mod status_bar;
pub mod table_view;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
