pub mod health;
pub mod healthdata;
pub mod insurance;
