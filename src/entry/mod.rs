//! Revenue and expense entries.
//!
//! This module contains everything related to entries:
//! - The [Entry] model and [EntryBuilder] plus the database queries
//! - The listing, create and edit pages
//! - The create, update and delete endpoints

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod entries_page;
mod form;

pub use self::core::{
    Entry, EntryBuilder, EntryId, EntryType, create_entry, create_entry_table, get_all_entries,
    get_entries_by_month_and_year, get_entry,
};
pub use create_endpoint::{CreateEntryState, create_entry_endpoint};
pub use create_page::{CreateEntryPageState, get_new_entry_page};
pub use delete_endpoint::{DeleteEntryEndpointState, delete_entry_endpoint};
pub use edit_endpoint::{EditEntryState, edit_entry_endpoint};
pub use edit_page::{EditEntryPageState, get_edit_entry_page};
pub use entries_page::{EntriesPageState, get_entries_page};
