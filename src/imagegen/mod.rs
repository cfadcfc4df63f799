pub(crate) mod client;
pub(crate) mod fallback;
pub(crate) mod prompts;
