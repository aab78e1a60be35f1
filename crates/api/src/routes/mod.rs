pub mod health;
pub mod toy;
