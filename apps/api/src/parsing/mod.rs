// Resume parsing: Candidate Profile model, prompts, the LLM pipeline, and its HTTP handlers.
// All LLM calls go through llm_client; no direct OpenAI calls here.

pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
