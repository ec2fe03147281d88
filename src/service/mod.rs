//! Business logic: token issuance, credential store, footprint repository

pub mod footprint;
pub mod token;
pub mod user;

pub use footprint::FootprintService;
pub use token::TokenService;
pub use user::UserService;
