// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here runs behind `jwt_auth_middleware` followed by
// `validate_user_middleware`, so handlers receive a `ValidatedUser`
// as the caller and authorize against it.

pub mod category;
pub mod todo;
