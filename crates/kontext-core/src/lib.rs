//! Core of the Kontext prompt engineer: the prompt composer, the Gemini-backed
//! field extractor and the form session that ties them together.

pub mod composer;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompts;
pub mod session;
pub mod types;

pub use composer::compose;
pub use config::Config;
pub use error::{ConfigError, ExtractError, SessionError};
pub use llm::{GeminiExtractor, PartsExtractor};
pub use session::{run_assist, Session, SessionSnapshot};
pub use types::{AssistStatus, PromptField, PromptParts};
