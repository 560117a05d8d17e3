pub mod template;

pub use crate::domain::model::{OfferLetterRecord, OfferType, PartialOfferLetter};
pub use crate::utils::error::Result;
pub use template::OfferLetterTemplate;
