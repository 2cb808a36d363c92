//! Configuration section definitions.

mod content;
mod serve;
mod site;
mod types;

pub use content::ContentConfig;
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
pub use types::TypeConfig;
