pub mod add;
pub mod cards;
pub mod due;
pub mod entries;
pub mod show;
pub mod stats;
