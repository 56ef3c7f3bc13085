pub mod zube;
