//! Render model: the scene buckets, the camera, and an SVG writer.

pub(crate) mod camera;
pub(crate) mod scene;
pub(crate) mod svg;
