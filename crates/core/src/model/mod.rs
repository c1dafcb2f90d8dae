mod card;
mod keys;
mod role;
mod session;
mod username;

pub use card::{Card, CardDraft, CardError, normalize_answer};
pub use keys::{DeckKey, KEY_PREFIX, SHARED_DECK_KEY, USERS_KEY};
pub use role::{ParseRoleError, Role};
pub use session::Session;
pub use username::{Username, UsernameError};
