pub mod fab;
pub mod intent;
pub mod library;
pub mod model;
pub mod motion;
pub mod navigator;
pub mod text;
pub mod view_model;
