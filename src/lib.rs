//! TNTP network, zoning and demand reader.
//!
//! Re-exports the core decoders and adds project settings files, so a whole
//! dataset can be read with a single call:
//!
//! ```no_run
//! let model = tntp::read_tntp_project(std::path::Path::new("SiouxFalls/settings.toml"))?;
//! println!("{}", model.summary());
//! # Ok::<(), tntp::SettingsError>(())
//! ```

pub mod settings;

pub use settings::{SettingsError, load_settings, parse_settings, read_tntp_project};
pub use tntp_core::prelude;
pub use tntp_core::prelude::*;
