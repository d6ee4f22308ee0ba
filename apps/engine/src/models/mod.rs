// Output and request models for the gap-analysis engine.
// These are the shapes the surrounding API layer serializes verbatim.

pub mod request;
pub mod skill_gap;
