#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cascade/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod label;
pub mod step;
pub mod transform;

pub use label::StepLabel;
pub use step::{Waterfall, WaterfallStep};
pub use transform::{compute_steps, percentages};
