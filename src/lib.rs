//! # headerfence
//!
//! A tool that keeps a fenced license header at the top of source files.
//!
//! A header is the license text with every line turned into a line comment,
//! framed by two marker lines (the comment prefix followed by a row of `=`).
//! Running the tool prepends a header to files that have none and replaces
//! an existing header in place, so reruns leave files byte-for-byte
//! unchanged and a new license text simply swaps out the old block.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use headerfence::file_filter::ExtensionFilter;
//! use headerfence::license::LicenseText;
//! use headerfence::processor::{Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let license = LicenseText::load(Path::new("misc/licence.header.md"))?;
//!
//!     let mut processor = Processor::new(ProcessorConfig {
//!         extension_filter: ExtensionFilter::from_cli(vec!["ts".to_string()], vec![]),
//!         ..ProcessorConfig::new(license, PathBuf::from("src"))
//!     })?;
//!
//!     for report in processor.process()? {
//!         println!("{}: {:?}", report.path.display(), report.action);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - File collection, filtering and the header splicer
//! * [`header`] - Header blocks and comment syntax resolution
//! * [`license`] - License text loading
//! * [`config`] - Config file and settings resolution
//!
//! [`processor`]: crate::processor
//! [`header`]: crate::header
//! [`license`]: crate::license
//! [`config`]: crate::config

pub mod config;
pub mod diff;
pub mod file_filter;
pub mod header;
pub mod license;
pub mod logging;
pub mod processor;
pub mod report;
