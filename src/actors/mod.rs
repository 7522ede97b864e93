pub mod lookup_controller;

pub use lookup_controller::{LookupController, LookupHandle, LookupMessage};
