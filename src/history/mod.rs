//! Local diagnosis history.
//!
//! `RecordStore` keeps the ordered list of saved verdicts in memory and
//! rewrites the whole list to a key/value `SettingsStore` after every
//! mutation. Persistence is best-effort: failures are logged, never
//! returned, and a history that cannot be read starts out empty.

pub mod error;
pub mod settings;
pub mod store;

pub use error::*;
pub use settings::*;
pub use store::*;
