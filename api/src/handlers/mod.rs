mod bearer;

pub use bearer::BearerSignInHandler;
