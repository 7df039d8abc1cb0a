//! Application Layer
//!
//! Use cases and application services.

pub mod biometric;
pub mod config;
pub mod login;
pub mod profile;
pub mod register;
pub mod token;

// Re-exports
pub use biometric::RegisterBiometricUseCase;
pub use config::IdentityConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use profile::GetProfileUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token::{TokenClaims, TokenService};
