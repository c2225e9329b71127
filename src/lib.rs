pub mod android;
pub mod canvas;
pub mod icon_gen;
