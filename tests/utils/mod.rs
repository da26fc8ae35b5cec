pub mod interactions;
pub mod setup;

pub use interactions::{command_interaction, InteractionBuilder};
pub use setup::{TestSetup, TestSetupBuilder};
