//! Client-side login session for the storefront page.
//!
//! The login page (outside this workspace) leaves a token and a profile
//! record in local storage. Presence of the token is the only login signal
//! the page uses.

mod error;
mod session;
mod token;
mod user;

pub use error::AuthError;
pub use session::{Session, SessionKeys, TOKEN_KEY, USER_INFO_KEY};
pub use token::AuthToken;
pub use user::UserInfo;
