pub mod calendar;
pub mod entries;
pub mod health;
pub mod migration;
