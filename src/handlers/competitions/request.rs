//! Competition request DTOs

use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{
    constants::{
        MAX_CLASS_YEAR, MAX_COMPETITION_NAME_LENGTH, MAX_LABEL_LENGTH, MAX_LIST_ENTRIES,
        MAX_NAME_LENGTH, MAX_NOTE_LENGTH, MIN_CLASS_YEAR,
    },
    db::repositories::CompetitionFields,
    models::CompetitionResult,
    utils::{
        normalize_list,
        validation::{sanitize_string, validate_class_letter, validate_not_blank},
    },
};

/// Create or update competition request.
///
/// Updates replace every field and the whole participant list.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRequest {
    #[validate(
        length(min = 1, max = MAX_COMPETITION_NAME_LENGTH),
        custom(function = "validate_not_blank_field")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = MAX_COMPETITION_NAME_LENGTH))]
    pub location: String,

    #[serde(default)]
    #[validate(length(max = MAX_LIST_ENTRIES))]
    pub subjects: Vec<String>,

    #[serde(default)]
    #[validate(length(max = MAX_LIST_ENTRIES))]
    pub teachers: Vec<String>,

    pub date: NaiveDate,

    /// Open string such as "regional" or "national"
    #[validate(
        length(min = 1, max = MAX_LABEL_LENGTH),
        custom(function = "validate_not_blank_field")
    )]
    pub level: String,

    /// Open string such as "school" or "oktvFinal"
    #[validate(
        length(min = 1, max = MAX_LABEL_LENGTH),
        custom(function = "validate_not_blank_field")
    )]
    pub round: String,

    #[serde(default)]
    #[validate(length(max = MAX_LIST_ENTRIES))]
    pub forms: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub result: CompetitionResultRequest,

    #[validate(length(max = MAX_NOTE_LENGTH))]
    pub other: Option<String>,

    #[serde(default, alias = "students")]
    #[validate(nested)]
    pub participants: Vec<ParticipantRequest>,
}

impl CompetitionRequest {
    /// Cleaned column values
    pub fn fields(&self) -> CompetitionFields {
        CompetitionFields {
            name: sanitize_string(&self.name),
            location: sanitize_string(&self.location),
            subjects: normalize_list(&self.subjects),
            teachers: normalize_list(&self.teachers),
            date: self.date,
            level: sanitize_string(&self.level),
            round: sanitize_string(&self.round),
            forms: normalize_list(&self.forms),
            result: self.result.clone().into(),
            other: self
                .other
                .as_deref()
                .map(sanitize_string)
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Competition outcome
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResultRequest {
    #[validate(range(min = 1))]
    pub position: Option<i32>,
    #[serde(default)]
    pub special_prize: bool,
    #[serde(default)]
    pub compliment: bool,
    #[serde(default)]
    pub next_round: bool,
}

impl From<CompetitionResultRequest> for CompetitionResult {
    fn from(r: CompetitionResultRequest) -> Self {
        Self {
            position: r.position,
            special_prize: r.special_prize,
            compliment: r.compliment,
            next_round: r.next_round,
        }
    }
}

/// One participant of a competition.
///
/// Either `student_id` refers to an existing student, or both names are
/// given and the student is looked up or created by name.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_participant_identity"))]
pub struct ParticipantRequest {
    pub student_id: Option<i32>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub first_name: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub last_name: Option<String>,

    #[validate(range(min = MIN_CLASS_YEAR, max = MAX_CLASS_YEAR))]
    pub class_year: i16,

    #[validate(custom(function = "validate_class_letter_field"))]
    pub class_letter: String,
}

fn validate_participant_identity(p: &ParticipantRequest) -> Result<(), ValidationError> {
    if p.student_id.is_some() {
        return Ok(());
    }

    let blank = |name: &Option<String>| name.as_deref().is_none_or(|n| n.trim().is_empty());
    if blank(&p.first_name) || blank(&p.last_name) {
        let mut err = ValidationError::new("participant_identity");
        err.message = Some("Participant needs a studentId or both first and last name".into());
        return Err(err);
    }
    Ok(())
}

fn validate_not_blank_field(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value).map_err(|msg| {
        let mut err = ValidationError::new("blank");
        err.message = Some(msg.into());
        err
    })
}

fn validate_class_letter_field(letter: &str) -> Result<(), ValidationError> {
    validate_class_letter(letter.trim()).map_err(|msg| {
        let mut err = ValidationError::new("class_letter");
        err.message = Some(msg.into());
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(student_id: Option<i32>, first: Option<&str>, last: Option<&str>) -> ParticipantRequest {
        ParticipantRequest {
            student_id,
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            class_year: 9,
            class_letter: "B".to_string(),
        }
    }

    fn request_json() -> serde_json::Value {
        serde_json::json!({
            "name": "  Regional chemistry contest ",
            "location": "Szeged",
            "subjects": ["chemistry", " chemistry", ""],
            "teachers": ["Dr. Kiss"],
            "date": "2024-11-20",
            "level": "regional",
            "round": "school",
            "forms": ["written"],
            "result": { "position": 2, "specialPrize": true },
            "students": [
                { "firstName": "Anna", "lastName": "Kiss", "classYear": 10, "classLetter": "a" },
                { "studentId": 7, "classYear": 11, "classLetter": "C" }
            ]
        })
    }

    #[test]
    fn test_deserialize_camel_case_with_students_alias() {
        let req: CompetitionRequest = serde_json::from_value(request_json()).unwrap();
        assert_eq!(req.participants.len(), 2);
        assert_eq!(req.participants[1].student_id, Some(7));
        assert_eq!(req.result.position, Some(2));
        assert!(req.result.special_prize);
        assert!(!req.result.next_round);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_fields_are_normalized() {
        let req: CompetitionRequest = serde_json::from_value(request_json()).unwrap();
        let fields = req.fields();
        assert_eq!(fields.name, "Regional chemistry contest");
        assert_eq!(fields.subjects, vec!["chemistry"]);
        assert_eq!(fields.other, None);
    }

    #[test]
    fn test_participant_needs_identity() {
        assert!(participant(Some(1), None, None).validate().is_ok());
        assert!(participant(None, Some("Anna"), Some("Kiss")).validate().is_ok());
        assert!(participant(None, Some("Anna"), None).validate().is_err());
        assert!(participant(None, Some("  "), Some("Kiss")).validate().is_err());
    }

    #[test]
    fn test_participant_class_rules() {
        let mut p = participant(Some(1), None, None);
        p.class_year = 14;
        assert!(p.validate().is_err());

        let mut p = participant(Some(1), None, None);
        p.class_letter = "AB".to_string();
        assert!(p.validate().is_err());

        // uppercases to "SS", which no longer fits a single letter
        let mut p = participant(Some(1), None, None);
        p.class_letter = "ß".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_whitespace_only_labels_are_rejected() {
        for field in ["name", "level", "round"] {
            let mut json = request_json();
            json[field] = serde_json::json!("   ");
            let req: CompetitionRequest = serde_json::from_value(json).unwrap();
            let errors = req.validate().unwrap_err();
            assert!(errors.field_errors().contains_key(field), "{field} should be rejected");
        }
    }

    #[test]
    fn test_invalid_result_position() {
        let mut json = request_json();
        json["result"]["position"] = serde_json::json!(0);
        let req: CompetitionRequest = serde_json::from_value(json).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_too_many_subjects() {
        let mut json = request_json();
        json["subjects"] = serde_json::json!(vec!["x"; 21]);
        let req: CompetitionRequest = serde_json::from_value(json).unwrap();
        assert!(req.validate().is_err());
    }
}
