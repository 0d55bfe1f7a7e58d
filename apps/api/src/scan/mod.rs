// Visibility scan: business record in, scan + social posts + email HTML out.
// All model calls go through llm_client.

pub mod email;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
