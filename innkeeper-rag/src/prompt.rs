//! Prompt construction
//!
//! The template is a fixed contract: downstream behavior (and the answer
//! tests) depend on it byte for byte, so keep any edits deliberate.

/// Build the generation prompt from retrieved context and the user's
/// question. Deterministic: the same inputs always yield the same prompt.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "Answer the following question based on the provided text:\n\nText: {context}\n\nQuestion: {question}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_byte_exact() {
        let prompt = build_prompt(
            "Guests must check out by 11am.",
            "What is the checkout time?",
        );
        assert_eq!(
            prompt,
            "Answer the following question based on the provided text:\n\n\
             Text: Guests must check out by 11am.\n\n\
             Question: What is the checkout time?"
        );
    }

    #[test]
    fn test_prompt_with_empty_context() {
        let prompt = build_prompt("", "Is breakfast included?");
        assert_eq!(
            prompt,
            "Answer the following question based on the provided text:\n\n\
             Text: \n\n\
             Question: Is breakfast included?"
        );
    }
}
