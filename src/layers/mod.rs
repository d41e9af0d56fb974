pub(crate) mod avatar;
pub(crate) mod cover;
pub(crate) mod gradient;
