pub mod catalog;
pub mod cli;
pub mod commits;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod meta;
pub mod model;
pub mod profile;
pub mod projects;
pub mod selection;
pub mod state;
pub mod store;
pub mod summary;
pub mod timeline;
pub mod tui;
pub mod units;
pub mod view;
