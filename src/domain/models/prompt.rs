use crate::domain::GenerationRequest;

/// Fixed instruction defining the BienDit copywriting persona.
///
/// The product is French, so the instruction (and the detail labels below)
/// stay in French: title in capitals built from type + standout feature +
/// city, warm storytelling register, at least one forbidden cliché, airy
/// paragraphs, and the answer must contain only the listing itself.
pub const SYSTEM_INSTRUCTION: &str = "\
Tu es \"BienDit\", un assistant expert en copywriting immobilier.
RÈGLES :
1. Titre en MAJUSCULES (Type + Atout + Ville).
2. Style storytelling chaleureux et vendeur.
3. Pas de clichés (\"coup de coeur assuré\" interdit).
4. Structure aérée avec des paragraphes clairs.
5. Réponds uniquement avec l'annonce (pas de phrase d'intro).";

/// The prompt sent to a text-generation provider for one listing.
///
/// Built from a [`GenerationRequest`] only, so construction is pure and
/// deterministic: the same request always yields the same prompt. Providers
/// that support a separate system slot use [`system`](Self::system) and
/// [`details`](Self::details); the rest use [`flattened`](Self::flattened).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPrompt {
    system: String,
    details: String,
}

impl ListingPrompt {
    pub fn from_request(request: &GenerationRequest) -> Self {
        let details = format!(
            "INFORMATIONS DU BIEN :\n\
             Type: {}\n\
             Ville: {}\n\
             Surface: {} m²\n\
             Prix: {}\n\
             Points Forts: {}\n\
             Points Faibles: {}",
            request.property_type(),
            request.city(),
            request.surface_area(),
            request.price(),
            request.strengths(),
            request.weaknesses(),
        );

        Self {
            system: SYSTEM_INSTRUCTION.to_string(),
            details,
        }
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    /// Single blended prompt for providers without a system/user split.
    pub fn flattened(&self) -> String {
        format!("{}\n---\n{}", self.system, self.details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListingInput;

    fn request() -> GenerationRequest {
        GenerationRequest::new(ListingInput {
            property_type: "T3".to_string(),
            city: "Lyon 6ème".to_string(),
            surface_area: 65,
            price: "320 000 €".to_string(),
            strengths: "Lumineux, balcon, calme".to_string(),
            weaknesses: "Rez-de-chaussée".to_string(),
        })
        .expect("input should be valid")
    }

    #[test]
    fn interpolates_every_field_verbatim() {
        let prompt = ListingPrompt::from_request(&request());
        let flat = prompt.flattened();

        for needle in [
            "T3",
            "Lyon 6ème",
            "65 m²",
            "320 000 €",
            "Lumineux, balcon, calme",
            "Rez-de-chaussée",
        ] {
            assert!(flat.contains(needle), "prompt should contain {needle:?}");
        }
    }

    #[test]
    fn carries_the_fixed_instruction_rules() {
        let prompt = ListingPrompt::from_request(&request());
        assert!(prompt.system().contains("MAJUSCULES"));
        assert!(prompt.system().contains("coup de coeur assuré"));
        assert!(prompt.system().contains("uniquement avec l'annonce"));
    }

    #[test]
    fn building_twice_yields_identical_prompts() {
        let request = request();
        let first = ListingPrompt::from_request(&request);
        let second = ListingPrompt::from_request(&request);
        assert_eq!(first, second);
        assert_eq!(first.flattened(), second.flattened());
    }

    #[test]
    fn flattened_contains_system_and_details() {
        let prompt = ListingPrompt::from_request(&request());
        let flat = prompt.flattened();
        assert!(flat.starts_with(prompt.system()));
        assert!(flat.ends_with(prompt.details()));
    }
}
