//! Immutable CLDR calendar and number-format data keyed by locale.
//!
//! ```
//! use almanac_core::{LookupError, bundled};
//!
//! let registry = bundled().unwrap();
//! assert_eq!(registry.text("fi", "field.year").unwrap(), "vuosi");
//! assert_eq!(registry.list("fi", "DayNames").unwrap()[0], "sunnuntaina");
//! assert!(matches!(registry.get("xx", "DayNames"), Err(LookupError::UnknownLocale(_))));
//! ```

pub mod bundled;
pub mod calendar;
pub mod config;
pub mod error;
pub mod keys;
pub mod loader;
pub mod number;
pub mod registry;
pub mod store;
pub mod table;
pub mod validate;
pub mod value;

pub use bundled::bundled;
pub use calendar::{CalendarView, Style};
pub use config::{AlmanacConfig, DataSource, load_config_file, load_config_str};
pub use error::{LoadError, LookupError};
pub use keys::{CalendarSystem, Context, KeyShape, Width};
pub use loader::{
    DataFormat, load_locale_str, load_registry_dir, load_registry_file, load_registry_str,
    write_registry_dir,
};
pub use number::NumberSymbols;
pub use registry::Registry;
pub use store::{get, global, install};
pub use table::{LocaleTable, TableBuilder};
pub use validate::{ShapeViolation, validate_registry, validate_table};
pub use value::Value;

// Code generated by locale_assets! reaches ctor through this path.
pub use ctor;
