//! Process-wide default schema set.
//!
//! A host installs its schema set once at startup; validators built without
//! an explicit set use it. The set is read-only once installed.

use std::sync::OnceLock;

use hedwig_schema::SchemaSet;
use tracing::debug;

static DEFAULT_SCHEMAS: OnceLock<SchemaSet> = OnceLock::new();

/// Install the default schema set. Returns the set back if one is already installed.
pub fn install_default_schemas(set: SchemaSet) -> Result<(), SchemaSet> {
    let types = set.len();
    DEFAULT_SCHEMAS.set(set)?;
    debug!(types, "installed default schema set");
    Ok(())
}

/// The installed default schema set, if any.
pub fn default_schemas() -> Option<&'static SchemaSet> {
    DEFAULT_SCHEMAS.get()
}
