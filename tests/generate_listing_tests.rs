//! End-to-end tests for the listing generation flow.
//!
//! Providers and the log are replaced with their in-process adapters, so
//! every path runs without network access.

use std::sync::Arc;

use biendit::{
    CopyGenerator, GeminiClient, GenerateListingUseCase, GenerationRequest, InMemoryListingLog,
    ListingInput, ListingPrompt, MockCopyGenerator, OpenAiClient, StaticSecrets,
};

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

#[tokio::test]
async fn generates_renders_and_logs_a_valid_listing() {
    let generator = Arc::new(MockCopyGenerator::with_response(
        "T3 LUMINEUX AU COEUR DE LYON...",
    ));
    let log = Arc::new(InMemoryListingLog::new());
    let use_case = GenerateListingUseCase::new(generator.clone(), log.clone());

    let request = GenerationRequest::new(valid_input()).expect("input should be valid");
    let outcome = use_case
        .execute(request)
        .await
        .expect("generation should succeed");

    assert_eq!(
        outcome.listing().generated_text(),
        "T3 LUMINEUX AU COEUR DE LYON..."
    );
    assert!(outcome.is_saved());
    assert_eq!(generator.call_count(), 1, "exactly one provider call");

    let rows = log.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.property_type(), "T3");
    assert_eq!(row.city(), "Lyon 6ème");
    assert_eq!(row.surface_area(), 65);
    assert_eq!(row.strengths(), "Lumineux, balcon, calme");
    assert_eq!(row.generated_text(), "T3 LUMINEUX AU COEUR DE LYON...");
}

#[tokio::test]
async fn invalid_input_never_reaches_a_provider() {
    // The use case only accepts a GenerationRequest, and the constructor is
    // the sole validation gate: an incomplete record cannot produce one.
    for input in [
        ListingInput {
            property_type: String::new(),
            ..valid_input()
        },
        ListingInput {
            city: String::new(),
            ..valid_input()
        },
        ListingInput {
            strengths: String::new(),
            ..valid_input()
        },
    ] {
        let err = GenerationRequest::new(input).expect_err("incomplete input must be rejected");
        assert!(err.is_invalid_input());
    }
}

#[tokio::test]
async fn generator_failure_aborts_before_logging() {
    let generator = Arc::new(MockCopyGenerator::failing());
    let log = Arc::new(InMemoryListingLog::new());
    let use_case = GenerateListingUseCase::new(generator.clone(), log.clone());

    let request = GenerationRequest::new(valid_input()).expect("input should be valid");
    let err = use_case
        .execute(request)
        .await
        .expect_err("generation should fail");

    assert!(err.is_generation());
    assert_eq!(generator.call_count(), 1);
    assert!(log.is_empty(), "a failed generation must not be logged");
}

#[tokio::test]
async fn empty_provider_response_is_a_generation_error() {
    let generator = Arc::new(MockCopyGenerator::with_response("   "));
    let log = Arc::new(InMemoryListingLog::new());
    let use_case = GenerateListingUseCase::new(generator, log.clone());

    let request = GenerationRequest::new(valid_input()).expect("input should be valid");
    let err = use_case
        .execute(request)
        .await
        .expect_err("blank text should be rejected");

    assert!(err.is_generation());
    assert!(log.is_empty());
}

#[tokio::test]
async fn log_failure_still_returns_the_listing() {
    let generator = Arc::new(MockCopyGenerator::with_response("UNE ANNONCE"));
    let log = Arc::new(InMemoryListingLog::failing());
    let use_case = GenerateListingUseCase::new(generator, log);

    let request = GenerationRequest::new(valid_input()).expect("input should be valid");
    let outcome = use_case
        .execute(request)
        .await
        .expect("log failure must not fail the request");

    assert_eq!(outcome.listing().generated_text(), "UNE ANNONCE");
    assert!(!outcome.is_saved());
    assert!(outcome
        .log_error()
        .expect("a save warning should be carried")
        .contains("append failure"));
}

#[tokio::test]
async fn missing_gemini_key_fails_before_any_network_call() {
    let generator = GeminiClient::new(Arc::new(StaticSecrets::new()));
    let request = GenerationRequest::new(valid_input()).expect("input should be valid");
    let prompt = ListingPrompt::from_request(&request);

    let err = generator
        .generate(&prompt)
        .await
        .expect_err("must fail without credentials");
    assert!(err.is_missing_secret());
    assert!(err.to_string().contains("GOOGLE_API_KEY"));
}

#[tokio::test]
async fn missing_openai_key_fails_before_any_network_call() {
    let generator = OpenAiClient::new(Arc::new(StaticSecrets::new()));
    let request = GenerationRequest::new(valid_input()).expect("input should be valid");
    let prompt = ListingPrompt::from_request(&request);

    let err = generator
        .generate(&prompt)
        .await
        .expect_err("must fail without credentials");
    assert!(err.is_missing_secret());
    assert!(err.to_string().contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn prompt_contains_every_supplied_field_verbatim() {
    let request = GenerationRequest::new(ListingInput {
        price: "310 000 €".to_string(),
        weaknesses: "Vis-à-vis".to_string(),
        ..valid_input()
    })
    .expect("input should be valid");

    let flat = ListingPrompt::from_request(&request).flattened();
    for needle in [
        "T3",
        "Lyon 6ème",
        "65 m²",
        "310 000 €",
        "Lumineux, balcon, calme",
        "Vis-à-vis",
        "coup de coeur assuré",
    ] {
        assert!(flat.contains(needle), "prompt should contain {needle:?}");
    }
}

#[tokio::test]
async fn successive_submissions_append_in_order() {
    let generator = Arc::new(MockCopyGenerator::new());
    let log = Arc::new(InMemoryListingLog::new());
    let use_case = GenerateListingUseCase::new(generator, log.clone());

    for city in ["Lyon 6ème", "Nantes", "Bordeaux"] {
        let request = GenerationRequest::new(ListingInput {
            city: city.to_string(),
            ..valid_input()
        })
        .expect("input should be valid");
        use_case
            .execute(request)
            .await
            .expect("generation should succeed");
    }

    let rows = log.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].city(), "Lyon 6ème");
    assert_eq!(rows[1].city(), "Nantes");
    assert_eq!(rows[2].city(), "Bordeaux");
}
