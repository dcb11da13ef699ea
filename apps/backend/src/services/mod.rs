pub mod history;
pub mod rewards;
pub mod session;
pub mod users;
