#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cascade/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod frame;
pub mod source;
pub mod statement;
pub mod yahoo;

pub use config::{FetchConfig, ProviderConfig};
pub use error::{DataError, Result};
pub use frame::to_dataframe;
pub use source::{IncomeStatementSource, JsonFileSource};
pub use statement::{LineItem, PeriodFinancials, PeriodType};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
