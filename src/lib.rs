pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TemplateConfig;

pub use core::OfferLetterTemplate;
pub use domain::model::{
    default_record, merge_json_with_defaults, merge_with_defaults, parse_partial, validate_offer_data,
    validate_record, OfferLetterRecord, OfferType, PartialOfferLetter, REQUIRED_FIELDS,
};
pub use utils::error::{OfferLetterError, Result};
