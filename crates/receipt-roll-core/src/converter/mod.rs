mod traits;
mod htmldoc;

pub use traits::{ConverterInfo, HtmlConverter};
pub use htmldoc::{Htmldoc, MIN_HTMLDOC_VERSION, htmldoc_args, parse_version};

use crate::config::AppConfig;
use crate::error::Result;

/// Locate and verify the HTML converter named by the configuration
pub fn create_converter(config: &AppConfig) -> Result<Box<dyn HtmlConverter>> {
    let converter = Htmldoc::discover(config.htmldoc_path.as_deref())?;
    Ok(Box::new(converter))
}
