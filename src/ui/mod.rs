pub mod background;
pub mod charts;
pub mod hover;
pub mod panels;
