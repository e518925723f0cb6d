//! Prompts used by the LLM-backed claim aligner.

/// Collection of prompts used for claim alignment.
pub struct Prompts;

impl Prompts {
    /// System prompt for the natural-language-inference judge.
    pub fn alignment_system() -> &'static str {
        "You are a meticulous natural language inference judge. You decide whether a claim is \
         entailed by, contradicted by, or neutral with respect to a source document, using only \
         the document."
    }

    /// Prompt to align one claim against a source document.
    pub fn claim_alignment() -> &'static str {
        r#"Source document:
{document}

Claim:
{claim}

Decide whether the document entails the claim.

Return the following JSON format:
{
    "label": "<entailment, neutral or contradiction>",
    "score": <probability between 0 and 1 that the claim is entailed>,
    "evidence": "<the shortest document span supporting your decision, or an empty string>"
}

Directly return the final JSON structure. Do not output anything else."#
    }

    /// Fill the alignment prompt for a document and claim.
    pub fn render_claim_alignment(document: &str, claim: &str) -> String {
        Self::claim_alignment()
            .replace("{document}", document)
            .replace("{claim}", claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_claim_alignment() {
        let prompt = Prompts::render_claim_alignment("The cat sat.", "cat sat");
        assert!(prompt.contains("Source document:\nThe cat sat."));
        assert!(prompt.contains("Claim:\ncat sat"));
        assert!(!prompt.contains("{document}"));
        assert!(!prompt.contains("{claim}"));
    }
}
