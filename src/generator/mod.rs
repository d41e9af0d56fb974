pub(crate) mod pipeline;
pub(crate) mod score;
