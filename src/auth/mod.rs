pub mod credentials;
pub mod gate;
pub mod jwt;
pub mod password;

pub use credentials::{authenticate_user, UserDirectory};
pub use gate::{get_admin_user, get_current_user, AdminUser, CurrentUser};
pub use jwt::{create_access_token, decode_token, Claims, TokenError};
pub use password::{hash_password, verify_password};
