pub(crate) mod card;
pub(crate) mod composite;
pub(crate) mod placeholder;
pub(crate) mod surface;
