pub mod crew;
pub mod rows;
pub mod settings;
pub mod walking;
