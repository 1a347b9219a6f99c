pub(crate) mod bounds;
pub(crate) mod document;
pub(crate) mod raster;
pub(crate) mod style_attr;
