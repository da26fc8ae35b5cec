pub mod command;
pub mod handlers;
pub mod registry;
pub mod response;
pub mod user;
pub mod verify;

pub use command::{Command, CommandContext, CommandError, CommandOptions, Interaction};
pub use registry::{CommandRegistry, RegistryError};
pub use response::ResponseBody;
pub use user::{Guild, User};
pub use verify::{Ed25519Verifier, NoopVerifier, Verifier, VerifyError};
