//! Operations behind the HTTP handlers.
//!
//! - [`icons`] -- Icon Store Accessor (list, get, add, delete, delete-icon).
//! - [`uploads`] -- Upload Handler (write files, attach URLs, clean up).

pub mod icons;
pub mod uploads;

pub use icons::IconLibraryService;

#[cfg(test)]
pub(crate) mod testing;
