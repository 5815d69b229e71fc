// Study & resume companion: prompt orchestration over a session.
// All LLM calls go through llm_client, no direct Gemini calls here.

pub mod dispatch;
pub mod mcq;
pub mod orchestrator;
pub mod prompts;
