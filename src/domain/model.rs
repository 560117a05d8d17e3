use crate::utils::dates::{format_letter_date, generated_timestamp, parse_issue_date};
use crate::utils::error::{OfferLetterError, Result};
use crate::utils::validation::{collect_missing_fields, ensure_no_missing_fields, Validate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const DOCUMENT_TYPE: &str = "offer_letter";
pub const SCHEMA_VERSION: &str = "1.0";

/// Keys that must be present and non-empty, in declaration order.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "date",
    "studentName",
    "dateOfBirth",
    "studentReferenceId",
    "offerType",
    "provider",
    "courseName",
    "courseStartDate",
    "signatoryName",
    "signatoryTitle",
];

/// Every serialized key of [`OfferLetterRecord`] other than the extra keys.
pub const KNOWN_FIELDS: [&str; 23] = [
    "date",
    "studentName",
    "dateOfBirth",
    "studentReferenceId",
    "offerType",
    "provider",
    "awardingBody",
    "cohort",
    "courseName",
    "tuitionFees",
    "courseDuration",
    "location",
    "courseStartDate",
    "bursaryAmount",
    "academicConditions",
    "otherConditions",
    "continuedText",
    "signatoryName",
    "signatoryTitle",
    "signatureBase64",
    "documentType",
    "version",
    "generatedDate",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferType {
    #[serde(rename = "Offer in Principle", alias = "OfferInPrinciple")]
    OfferInPrinciple,
    #[serde(rename = "Unconditional Offer", alias = "UnconditionalOffer")]
    UnconditionalOffer,
    #[serde(rename = "Conditional Offer", alias = "ConditionalOffer")]
    ConditionalOffer,
}

impl OfferType {
    pub const ALL: [OfferType; 3] = [
        OfferType::OfferInPrinciple,
        OfferType::UnconditionalOffer,
        OfferType::ConditionalOffer,
    ];

    /// The wording printed on the letter.
    pub fn label(&self) -> &'static str {
        match self {
            OfferType::OfferInPrinciple => "Offer in Principle",
            OfferType::UnconditionalOffer => "Unconditional Offer",
            OfferType::ConditionalOffer => "Conditional Offer",
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            OfferType::OfferInPrinciple => "OfferInPrinciple",
            OfferType::UnconditionalOffer => "UnconditionalOffer",
            OfferType::ConditionalOffer => "ConditionalOffer",
        }
    }
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OfferType {
    type Err = OfferLetterError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        OfferType::ALL
            .into_iter()
            .find(|t| {
                t.label().eq_ignore_ascii_case(wanted) || t.variant_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| OfferLetterError::InvalidValue {
                field: "offerType".to_string(),
                value: s.to_string(),
                reason: format!(
                    "Expected one of: {}",
                    OfferType::ALL.map(|t| t.label()).join(", ")
                ),
            })
    }
}

/// One complete set of offer letter content, ready for the PDF renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferLetterRecord {
    pub date: String,

    pub student_name: String,
    pub date_of_birth: String,
    pub student_reference_id: String,

    /// `None` when the caller blanked it; serialized as `null`.
    pub offer_type: Option<OfferType>,

    pub provider: String,
    pub awarding_body: String,
    pub cohort: String,
    pub course_name: String,
    pub tuition_fees: String,
    pub course_duration: String,
    pub location: String,
    pub course_start_date: String,

    pub bursary_amount: Option<String>,

    pub academic_conditions: Vec<String>,
    pub other_conditions: Vec<String>,

    /// Text that overflows onto page two.
    pub continued_text: String,

    pub signatory_name: String,
    pub signatory_title: String,
    /// Base64 signature image. Decoding is left to the renderer.
    pub signature_base64: Option<String>,

    pub document_type: String,
    pub version: String,
    pub generated_date: String,

    /// Caller keys outside the known layout, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Caller-supplied fields to lay over a set of defaults.
///
/// `None` keeps the default. A supplied JSON `null` wins like any other value:
/// text fields become empty (and so fail validation when required),
/// `offer_type` becomes missing, and `bursary_amount` / `signature_base64`
/// are cleared. The two conditions lists are the exception: `null` keeps the
/// default lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOfferLetter {
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub student_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub student_reference_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "offer_type_or_missing",
        skip_serializing_if = "Option::is_none"
    )]
    pub offer_type: Option<Option<OfferType>>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub awarding_body: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub cohort: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub course_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub tuition_fees: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub course_duration: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub course_start_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub bursary_amount: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_conditions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_conditions: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub continued_text: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub signatory_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub signatory_title: Option<String>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub signature_base64: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub document_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_date: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// A present key becomes `Some`, even when its value is null.
fn explicit_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// A supplied null reads as the empty string.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|v| Some(v.unwrap_or_default()))
}

// `null` and `""` mark the offer type as missing; anything else must name a type.
fn offer_type_or_missing<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<OfferType>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(Some(None)),
        Some(label) if label.is_empty() => Ok(Some(None)),
        Some(label) => label
            .parse::<OfferType>()
            .map(|t| Some(Some(t)))
            .map_err(serde::de::Error::custom),
    }
}

fn pick<T: Clone>(supplied: &Option<T>, fallback: &T) -> T {
    supplied.as_ref().unwrap_or(fallback).clone()
}

static DEFAULT_RECORD: LazyLock<OfferLetterRecord> = LazyLock::new(|| OfferLetterRecord {
    date: "DD/MM/YYYY".to_string(),
    student_name: "<Student Name>".to_string(),
    date_of_birth: "DD/MM/YYYY".to_string(),
    student_reference_id: "LD-60000-159277".to_string(),
    offer_type: Some(OfferType::OfferInPrinciple),
    provider: "RTC Education Ltd trading as Regent College London".to_string(),
    awarding_body: "University of Greater Manchester".to_string(),
    cohort: "<Intake Name>".to_string(),
    course_name: "<Course Name>".to_string(),
    tuition_fees: "£17,500**".to_string(),
    course_duration: "1 Year".to_string(),
    location: "London".to_string(),
    course_start_date: "22/03/2026".to_string(),
    bursary_amount: Some("£5000.00".to_string()),
    academic_conditions: vec!["Statement of comparability from Naric and MOI".to_string()],
    other_conditions: vec![
        "Attending a Credibility Interview and satisfying the interviewer regarding your intention to study. Please refer to the College's credibility interview policy <link> for further information.".to_string(),
        "Signed Tuition Plan and evidence of payment or notification of payment to the tuition fees (Details will be provided on the payment plan after undergoing the Credibility Interview).".to_string(),
        "UKVI Compliant Bank Statement showing that you have the necessary funds for maintenance and the remaining balance of the course fee. The funds must be held for at least 28 consecutive days. The end date of the 28-day period must be within 31 calendar days of the date you intend to apply for your visa. Further information about the money you will need can be found <link>.".to_string(),
        "TB test certificate (if applicable). A full list of countries that require a TB test certificate for Student Visa Route application can be found <link>.".to_string(),
    ],
    continued_text: "location while you are looking for suitable accommodation. Please check with us when enquiring about the course; however, your campus address will be confirmed in your CAS letter.".to_string(),
    signatory_name: "Turkiz Erdogan".to_string(),
    signatory_title: "Head of Admissions".to_string(),
    signature_base64: None,
    document_type: DOCUMENT_TYPE.to_string(),
    version: SCHEMA_VERSION.to_string(),
    generated_date: generated_timestamp(),
    extra: BTreeMap::new(),
});

/// Returns a copy of the process-wide default record.
///
/// The shared instance is built on first access and never changes; callers
/// get their own copy to modify.
pub fn default_record() -> OfferLetterRecord {
    DEFAULT_RECORD.clone()
}

impl Default for OfferLetterRecord {
    fn default() -> Self {
        default_record()
    }
}

impl OfferLetterRecord {
    /// Lays `partial` over `self` one field at a time. Supplied values replace
    /// the base value wholesale, conditions lists included.
    pub fn merged_with(&self, partial: &PartialOfferLetter) -> OfferLetterRecord {
        let mut extra = self.extra.clone();
        for (key, value) in &partial.extra {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                extra.insert(key.clone(), value.clone());
            }
        }

        OfferLetterRecord {
            date: pick(&partial.date, &self.date),
            student_name: pick(&partial.student_name, &self.student_name),
            date_of_birth: pick(&partial.date_of_birth, &self.date_of_birth),
            student_reference_id: pick(&partial.student_reference_id, &self.student_reference_id),
            offer_type: pick(&partial.offer_type, &self.offer_type),
            provider: pick(&partial.provider, &self.provider),
            awarding_body: pick(&partial.awarding_body, &self.awarding_body),
            cohort: pick(&partial.cohort, &self.cohort),
            course_name: pick(&partial.course_name, &self.course_name),
            tuition_fees: pick(&partial.tuition_fees, &self.tuition_fees),
            course_duration: pick(&partial.course_duration, &self.course_duration),
            location: pick(&partial.location, &self.location),
            course_start_date: pick(&partial.course_start_date, &self.course_start_date),
            bursary_amount: pick(&partial.bursary_amount, &self.bursary_amount),
            academic_conditions: pick(&partial.academic_conditions, &self.academic_conditions),
            other_conditions: pick(&partial.other_conditions, &self.other_conditions),
            continued_text: pick(&partial.continued_text, &self.continued_text),
            signatory_name: pick(&partial.signatory_name, &self.signatory_name),
            signatory_title: pick(&partial.signatory_title, &self.signatory_title),
            signature_base64: pick(&partial.signature_base64, &self.signature_base64),
            document_type: pick(&partial.document_type, &self.document_type),
            version: pick(&partial.version, &self.version),
            generated_date: pick(&partial.generated_date, &self.generated_date),
            extra,
        }
    }

    /// Required fields holding an empty string, in declaration order.
    pub fn missing_required_fields(&self) -> Vec<String> {
        let required: [(&str, &str); 10] = [
            ("date", self.date.as_str()),
            ("studentName", self.student_name.as_str()),
            ("dateOfBirth", self.date_of_birth.as_str()),
            ("studentReferenceId", self.student_reference_id.as_str()),
            ("offerType", self.offer_type.map_or("", |t| t.label())),
            ("provider", self.provider.as_str()),
            ("courseName", self.course_name.as_str()),
            ("courseStartDate", self.course_start_date.as_str()),
            ("signatoryName", self.signatory_name.as_str()),
            ("signatoryTitle", self.signatory_title.as_str()),
        ];

        required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field.to_string())
            .collect()
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Pretty JSON, or a single line when `compact`.
    pub fn to_json_string(&self, compact: bool) -> Result<String> {
        let output = if compact {
            serde_json::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        Ok(output)
    }
}

impl Validate for OfferLetterRecord {
    fn validate(&self) -> Result<()> {
        validate_record(self).map(|_| ())
    }
}

impl PartialOfferLetter {
    /// Reads a partial record out of an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(OfferLetterError::InvalidValue {
                field: "input".to_string(),
                value: value_kind(value).to_string(),
                reason: "Offer letter data must be a JSON object".to_string(),
            });
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Serialized names of the keys this partial supplies.
    pub fn supplied_keys(&self) -> Vec<String> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &PartialOfferLetter::default()
    }
}

impl From<OfferLetterRecord> for PartialOfferLetter {
    fn from(record: OfferLetterRecord) -> Self {
        PartialOfferLetter {
            date: Some(record.date),
            student_name: Some(record.student_name),
            date_of_birth: Some(record.date_of_birth),
            student_reference_id: Some(record.student_reference_id),
            offer_type: Some(record.offer_type),
            provider: Some(record.provider),
            awarding_body: Some(record.awarding_body),
            cohort: Some(record.cohort),
            course_name: Some(record.course_name),
            tuition_fees: Some(record.tuition_fees),
            course_duration: Some(record.course_duration),
            location: Some(record.location),
            course_start_date: Some(record.course_start_date),
            bursary_amount: Some(record.bursary_amount),
            academic_conditions: Some(record.academic_conditions),
            other_conditions: Some(record.other_conditions),
            continued_text: Some(record.continued_text),
            signatory_name: Some(record.signatory_name),
            signatory_title: Some(record.signatory_title),
            signature_base64: Some(record.signature_base64),
            document_type: Some(record.document_type),
            version: Some(record.version),
            generated_date: Some(record.generated_date),
            extra: record.extra,
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Checks an untyped mapping for every required field.
///
/// Returns `Ok(true)` when nothing is missing, otherwise a validation error
/// naming every missing field.
pub fn validate_offer_data(data: &Value) -> Result<bool> {
    let missing = collect_missing_fields(data, &REQUIRED_FIELDS);
    if !missing.is_empty() {
        tracing::debug!("Offer letter data is missing {:?}", missing);
    }
    ensure_no_missing_fields(missing)
}

pub fn validate_record(record: &OfferLetterRecord) -> Result<bool> {
    ensure_no_missing_fields(record.missing_required_fields())
}

/// Lays caller fields over the default record.
pub fn merge_with_defaults(partial: &PartialOfferLetter) -> OfferLetterRecord {
    DEFAULT_RECORD.merged_with(partial)
}

pub fn merge_json_with_defaults(data: &Value) -> Result<OfferLetterRecord> {
    let partial = PartialOfferLetter::from_value(data)?;
    Ok(merge_with_defaults(&partial))
}

/// Reads raw caller JSON into a partial record.
///
/// Blank input is an empty object. When `issue_date` is given it replaces any
/// supplied `date`, formatted as DD/MM/YYYY.
pub fn parse_partial(raw: &str, issue_date: Option<&str>) -> Result<PartialOfferLetter> {
    let value: Value = if raw.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(raw)?
    };

    let mut partial = PartialOfferLetter::from_value(&value)?;
    if let Some(issue_date) = issue_date {
        partial.date = Some(format_letter_date(parse_issue_date(issue_date)?));
        tracing::debug!("Issue date set to {:?}", partial.date);
    }
    Ok(partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_required_fields_match_declared_list() {
        let mut record = default_record();
        record.date.clear();
        record.student_name.clear();
        record.date_of_birth.clear();
        record.student_reference_id.clear();
        record.provider.clear();
        record.course_name.clear();
        record.course_start_date.clear();
        record.signatory_name.clear();
        record.signatory_title.clear();
        record.offer_type = None;

        let expected: Vec<String> = REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect();
        assert_eq!(record.missing_required_fields(), expected);
    }

    #[test]
    fn test_serialized_keys_match_known_fields() {
        let value = default_record().to_json().unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for field in KNOWN_FIELDS {
            assert!(keys.contains(&field), "missing key {}", field);
        }
        assert_eq!(keys.len(), KNOWN_FIELDS.len());
        assert_eq!(value["bursaryAmount"], json!("£5000.00"));
        assert_eq!(value["signatureBase64"], Value::Null);
        assert_eq!(value["offerType"], json!("Offer in Principle"));
    }

    #[test]
    fn test_offer_type_parsing() {
        assert_eq!(
            "Conditional Offer".parse::<OfferType>().unwrap(),
            OfferType::ConditionalOffer
        );
        assert_eq!(
            "UnconditionalOffer".parse::<OfferType>().unwrap(),
            OfferType::UnconditionalOffer
        );
        assert_eq!(
            "offer in principle".parse::<OfferType>().unwrap(),
            OfferType::OfferInPrinciple
        );
        assert!("Maybe Offer".parse::<OfferType>().is_err());

        let from_variant: OfferType = serde_json::from_value(json!("ConditionalOffer")).unwrap();
        assert_eq!(from_variant, OfferType::ConditionalOffer);
        assert_eq!(OfferType::UnconditionalOffer.to_string(), "Unconditional Offer");
    }

    #[test]
    fn test_explicit_null_clears_nullable_default() {
        let partial = PartialOfferLetter::from_value(&json!({ "bursaryAmount": null })).unwrap();
        assert_eq!(partial.bursary_amount, Some(None));
        assert_eq!(merge_with_defaults(&partial).bursary_amount, None);

        let untouched = merge_with_defaults(&PartialOfferLetter::default());
        assert_eq!(untouched.bursary_amount.as_deref(), Some("£5000.00"));
    }

    #[test]
    fn test_null_conditions_fall_back_to_defaults() {
        let partial =
            PartialOfferLetter::from_value(&json!({ "academicConditions": null })).unwrap();
        let merged = merge_with_defaults(&partial);
        assert_eq!(merged.academic_conditions, default_record().academic_conditions);
    }

    #[test]
    fn test_extra_keys_pass_through() {
        let partial = PartialOfferLetter::from_value(&json!({
            "studentName": "Amir Khan",
            "campus": "Holborn"
        }))
        .unwrap();
        assert_eq!(partial.extra.get("campus"), Some(&json!("Holborn")));
        assert!(!partial.extra.contains_key("studentName"));

        let merged = merge_with_defaults(&partial);
        assert_eq!(merged.extra.get("campus"), Some(&json!("Holborn")));
        assert_eq!(merged.to_json().unwrap()["campus"], json!("Holborn"));
    }

    #[test]
    fn test_extra_cannot_shadow_known_field() {
        let mut partial = PartialOfferLetter::default();
        partial
            .extra
            .insert("studentName".to_string(), json!("Shadow"));
        let merged = merge_with_defaults(&partial);
        assert!(merged.extra.is_empty());
        assert_eq!(merged.student_name, "<Student Name>");
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = PartialOfferLetter::from_value(&json!(["a"])).unwrap_err();
        assert!(matches!(err, OfferLetterError::InvalidValue { .. }));

        let err = PartialOfferLetter::from_value(&json!({ "studentName": 42 })).unwrap_err();
        assert!(matches!(err, OfferLetterError::Serialization(_)));
    }

    #[test]
    fn test_supplied_keys() {
        let partial = PartialOfferLetter {
            student_name: Some("Jane Doe".to_string()),
            signature_base64: Some(None),
            ..Default::default()
        };
        let mut keys = partial.supplied_keys();
        keys.sort();
        assert_eq!(keys, vec!["signatureBase64", "studentName"]);
        assert!(!partial.is_empty());
        assert!(PartialOfferLetter::default().is_empty());
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = default_record();
        let value = record.to_json().unwrap();
        let back: OfferLetterRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_null_required_fields_survive_merge_and_fail_validation() {
        let merged =
            merge_json_with_defaults(&json!({ "studentName": null, "signatoryName": null }))
                .unwrap();
        assert_eq!(merged.student_name, "");
        assert_eq!(merged.signatory_name, "");

        let err = validate_record(&merged).unwrap_err();
        assert_eq!(err.missing_fields(), ["studentName", "signatoryName"]);

        let err = validate_offer_data(&merged.to_json().unwrap()).unwrap_err();
        assert_eq!(err.missing_fields(), ["studentName", "signatoryName"]);
    }

    #[test]
    fn test_blank_offer_type_is_missing_not_malformed() {
        for raw in [json!({ "offerType": "" }), json!({ "offerType": null })] {
            let merged = merge_json_with_defaults(&raw).unwrap();
            assert_eq!(merged.offer_type, None);
            let err = validate_record(&merged).unwrap_err();
            assert_eq!(err.missing_fields(), ["offerType"]);
            assert_eq!(merged.to_json().unwrap()["offerType"], Value::Null);
        }

        let err = merge_json_with_defaults(&json!({ "offerType": "Maybe Offer" })).unwrap_err();
        assert!(matches!(err, OfferLetterError::Serialization(_)));
    }

    #[test]
    fn test_blank_offer_type_merges_idempotently() {
        let once = merge_json_with_defaults(&json!({ "offerType": "" })).unwrap();
        let twice = merge_json_with_defaults(&once.to_json().unwrap()).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn test_parse_partial_blank_input_is_empty_object() {
        assert!(parse_partial("", None).unwrap().is_empty());
        assert!(parse_partial("  \n", None).unwrap().is_empty());
        assert_eq!(merge_with_defaults(&parse_partial("", None).unwrap()), default_record());
    }

    #[test]
    fn test_parse_partial_issue_date_overrides_supplied_date() {
        let partial =
            parse_partial(r#"{"date": "01/01/2020", "studentName": "Jane Doe"}"#, Some("2026-03-22"))
                .unwrap();
        assert_eq!(partial.date.as_deref(), Some("22/03/2026"));
        assert_eq!(partial.student_name.as_deref(), Some("Jane Doe"));

        let err = parse_partial("{}", Some("not a date")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_parse_partial_rejects_bad_input_with_exit_code_two() {
        let err = parse_partial("[1, 2]", None).unwrap_err();
        assert!(matches!(err, OfferLetterError::InvalidValue { .. }));
        assert_eq!(err.exit_code(), 2);

        let err = parse_partial("{ not json", None).unwrap_err();
        assert!(matches!(err, OfferLetterError::Serialization(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_to_json_string_compact_is_single_line() {
        let record = default_record();
        assert!(!record.to_json_string(true).unwrap().contains('\n'));
        assert!(record.to_json_string(false).unwrap().contains('\n'));
    }
}
