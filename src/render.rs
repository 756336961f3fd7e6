pub(crate) mod canvas;
pub(crate) mod compositor;
pub(crate) mod noise;
pub(crate) mod warp;
