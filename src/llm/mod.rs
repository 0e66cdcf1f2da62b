// AI summary generation: prompt construction and the Gemini API client.

pub mod client;
pub mod prompt;
