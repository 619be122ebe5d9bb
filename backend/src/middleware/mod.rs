pub mod rate_limit;
pub mod session;

pub use rate_limit::*;
pub use session::*;
