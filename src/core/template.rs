use crate::domain::model::{
    default_record, validate_record, OfferLetterRecord, PartialOfferLetter,
};
use crate::utils::error::Result;
use serde_json::Value;

/// A set of offer letter defaults that caller data is merged over.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferLetterTemplate {
    defaults: OfferLetterRecord,
}

impl OfferLetterTemplate {
    /// The template backed by the built-in default record.
    pub fn builtin() -> Self {
        Self {
            defaults: default_record(),
        }
    }

    pub fn with_defaults(defaults: OfferLetterRecord) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &OfferLetterRecord {
        &self.defaults
    }

    /// Shallow merge of `partial` over this template's defaults. Never fails
    /// and never validates.
    pub fn merge(&self, partial: &PartialOfferLetter) -> OfferLetterRecord {
        if tracing::enabled!(tracing::Level::DEBUG) {
            let supplied = partial.supplied_keys();
            tracing::debug!(
                "Merging {} supplied field(s) over template defaults: {:?}",
                supplied.len(),
                supplied
            );
        }
        self.defaults.merged_with(partial)
    }

    pub fn merge_json(&self, data: &Value) -> Result<OfferLetterRecord> {
        let partial = PartialOfferLetter::from_value(data)?;
        Ok(self.merge(&partial))
    }

    /// Merges and then validates: the record handed to the renderer.
    pub fn prepare(&self, partial: &PartialOfferLetter) -> Result<OfferLetterRecord> {
        let record = self.merge(partial);
        if let Err(e) = validate_record(&record) {
            tracing::warn!("❌ Offer letter failed validation: {}", e);
            return Err(e);
        }
        tracing::info!(
            "✅ Offer letter ready for {} ({})",
            record.student_reference_id,
            record.offer_type.map_or("", |t| t.label())
        );
        Ok(record)
    }
}

impl Default for OfferLetterTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}
