use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Raw listing attributes as supplied by the user.
///
/// Nothing is guaranteed about these fields; validation happens when the
/// record is promoted to a [`GenerationRequest`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingInput {
    pub property_type: String,
    pub city: String,
    /// Square meters. Optional in the form; 0 means "not provided".
    pub surface_area: u32,
    /// Free text, may be empty.
    pub price: String,
    /// Free-text enumeration, e.g. "Lumineux, balcon, calme".
    pub strengths: String,
    /// Free text, may be empty.
    pub weaknesses: String,
}

/// A listing record that passed validation and may be sent to a provider.
///
/// Constructing one is the only way to reach the generation path: the
/// constructor rejects any input with an empty property type, city, or
/// strengths field, so no outbound call can ever see an incomplete record.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    input: ListingInput,
}

impl GenerationRequest {
    pub fn new(input: ListingInput) -> Result<Self, DomainError> {
        let mut missing = Vec::new();
        if input.property_type.trim().is_empty() {
            missing.push("property type");
        }
        if input.city.trim().is_empty() {
            missing.push("city");
        }
        if input.strengths.trim().is_empty() {
            missing.push("strengths");
        }

        if !missing.is_empty() {
            return Err(DomainError::invalid_input(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { input })
    }

    pub fn property_type(&self) -> &str {
        &self.input.property_type
    }

    pub fn city(&self) -> &str {
        &self.input.city
    }

    pub fn surface_area(&self) -> u32 {
        self.input.surface_area
    }

    pub fn price(&self) -> &str {
        &self.input.price
    }

    pub fn strengths(&self) -> &str {
        &self.input.strengths
    }

    pub fn weaknesses(&self) -> &str {
        &self.input.weaknesses
    }

    pub fn input(&self) -> &ListingInput {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ListingInput {
        ListingInput {
            property_type: "T3".to_string(),
            city: "Lyon 6ème".to_string(),
            surface_area: 65,
            price: String::new(),
            strengths: "Lumineux, balcon, calme".to_string(),
            weaknesses: String::new(),
        }
    }

    #[test]
    fn accepts_a_complete_record() {
        let request = GenerationRequest::new(valid_input()).expect("input should be valid");
        assert_eq!(request.property_type(), "T3");
        assert_eq!(request.city(), "Lyon 6ème");
        assert_eq!(request.surface_area(), 65);
    }

    #[test]
    fn optional_fields_may_be_empty() {
        let input = ListingInput {
            price: String::new(),
            weaknesses: String::new(),
            surface_area: 0,
            ..valid_input()
        };
        assert!(GenerationRequest::new(input).is_ok());
    }

    #[test]
    fn rejects_empty_property_type() {
        let input = ListingInput {
            property_type: String::new(),
            ..valid_input()
        };
        let err = GenerationRequest::new(input).expect_err("should be rejected");
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("property type"));
    }

    #[test]
    fn rejects_empty_city() {
        let input = ListingInput {
            city: "   ".to_string(),
            ..valid_input()
        };
        let err = GenerationRequest::new(input).expect_err("should be rejected");
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("city"));
    }

    #[test]
    fn rejects_empty_strengths() {
        let input = ListingInput {
            strengths: String::new(),
            ..valid_input()
        };
        let err = GenerationRequest::new(input).expect_err("should be rejected");
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("strengths"));
    }

    #[test]
    fn reports_all_missing_fields_at_once() {
        let err = GenerationRequest::new(ListingInput::default())
            .expect_err("empty record should be rejected");
        let msg = err.to_string();
        assert!(msg.contains("property type"));
        assert!(msg.contains("city"));
        assert!(msg.contains("strengths"));
    }
}
