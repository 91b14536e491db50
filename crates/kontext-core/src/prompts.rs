//! Prompt and response schema for the Gemini field extractor.
use serde_json::{json, Value};

pub const EXTRACTION_INSTRUCTION: &str = "You are a world-class prompt engineer specializing in the FLUX.1 Kontext image editing tool. \
Your task is to take a user's simple, natural language request for an image edit (which may be in Chinese or another language) \
and deconstruct it into a structured format with English values, suitable for generating a professional Kontext prompt. \
You must identify the key components of the edit: what to change, how to change it, what to keep the same, and the desired style. \
It is crucial to infer what should be preserved even if the user doesn't explicitly state it. \
For example, if a user says \"change the woman's shirt to red\", you must infer that the woman's face, hair, and the background should be preserved. \
Respond ONLY with a valid JSON object matching the provided schema, with all values in English.";

/// Instruction followed by the user's raw request.
pub fn extraction_prompt(raw_input: &str) -> String {
    format!(
        "{}\n\nUser's request: \"{}\"",
        EXTRACTION_INSTRUCTION, raw_input
    )
}

/// Gemini `responseSchema`: four required string fields.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "target": {
                "type": "STRING",
                "description": "The specific object, person, or area to be edited. Be concise and clear."
            },
            "change": {
                "type": "STRING",
                "description": "A detailed description of the desired modification or transformation."
            },
            "preserve": {
                "type": "STRING",
                "description": "A comma-separated list of all important elements that must remain unchanged. Infer this from context. For example, if changing a shirt, preserve the person's face, hair, and the background."
            },
            "style": {
                "type": "STRING",
                "description": "The desired artistic style, quality, or technical parameters (e.g., 'photorealistic, 4k, cinematic lighting'). If not specified, use 'highly detailed, photorealistic'."
            }
        },
        "required": ["target", "change", "preserve", "style"]
    })
}
