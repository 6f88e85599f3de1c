pub mod api;

pub use api::{
    evaluate_answer,
    generate_flashcards,
};

pub fn deck_prompt(topic: &str, max_cards: u32) -> String {
    format!(
        "Generate a list of flashcards for the topic of \"{topic}\". Each flashcard should have \
         a term and a concise definition. Format the output as a list of \"Term: Definition\" \
         pairs, with each pair on a new line. Ensure terms and definitions are distinct and \
         clearly separated by a single colon. Maximum {max_cards} flashcards.\n\
         Example output format:\n\
         Mitochondria: The powerhouse of the cell.\n\
         Ribosome: Site of protein synthesis."
    )
}

pub fn evaluation_prompt(term: &str, definition: &str, answer: &str) -> String {
    format!(
        "You are an AI assistant evaluating a user's understanding of a concept based on their \
         spoken answer to a flashcard.\n\
         Flashcard Term: \"{term}\"\n\
         Correct Definition: \"{definition}\"\n\
         User's Spoken Answer: \"{answer}\"\n\
         Analyze the user's spoken answer in relation to the correct definition.\n\
         Determine if the user's answer is:\n\
         1. \"correct\": The user's answer accurately and comprehensively covers the main points \
         of the correct definition.\n\
         2. \"partially_correct\": The user's answer captures some aspects of the correct \
         definition but misses key details or contains minor inaccuracies.\n\
         3. \"incorrect\": The user's answer is fundamentally different from the correct \
         definition or demonstrates a significant misunderstanding.\n\
         Provide your evaluation in JSON format with two keys: \"assessment\" (string: \
         \"correct\", \"partially_correct\", or \"incorrect\") and \"explanation\" (string: a \
         brief explanation for your assessment, max 30 words)."
    )
}
