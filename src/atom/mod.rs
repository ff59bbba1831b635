pub mod layout;
pub mod shapes;
