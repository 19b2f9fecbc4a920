//! Category module
//!
//! Categories classify entries (e.g. 'Salary', 'Food'). Provides the
//! domain types, database queries, the list/create pages and the
//! create/delete endpoints.

mod categories_page;
mod create;
mod db;
mod delete;
mod domain;

pub use categories_page::{CategoriesPageState, get_categories_page};
pub use create::{CreateCategoryEndpointState, create_category_endpoint, get_new_category_page};
pub use db::{
    create_category, create_category_table, delete_category, get_all_categories, get_category,
};
pub use delete::{DeleteCategoryEndpointState, delete_category_endpoint};
pub use domain::{Category, CategoryFormData, CategoryId, CategoryName};
