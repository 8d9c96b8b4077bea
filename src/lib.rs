//! Theme path maps: which directories to search for a view, compiled
//! from path variables, the theme class hierarchy and aliases.

pub mod warn;
pub mod boxed_error;
pub mod error;
pub mod util;
pub mod alist;
pub mod path;
pub mod var;
pub mod alias;
pub mod substitute;
pub mod pathmap;
pub mod ancestors;
pub mod theme;
pub mod theme_manager;
pub mod config;
