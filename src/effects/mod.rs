pub(crate) mod blur;
pub(crate) mod color;
pub(crate) mod composite;
pub(crate) mod gradient;
pub(crate) mod resize;
