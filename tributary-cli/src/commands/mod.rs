//! CLI command implementations

pub mod check;
pub mod run;
pub mod verify;

pub use check::CheckArgs;
pub use run::RunArgs;
pub use verify::VerifyArgs;
