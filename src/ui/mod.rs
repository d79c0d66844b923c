pub mod anim;
pub mod panels;
pub mod plot;
