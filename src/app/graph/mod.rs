pub(in crate::app) mod interaction;
pub(in crate::app) mod render;
mod view;
