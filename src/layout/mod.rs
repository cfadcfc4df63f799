pub(crate) mod config;
pub(crate) mod regions;

#[cfg(test)]
#[path = "../../tests/unit/layout/mod.rs"]
mod tests;
