pub mod rounds;
pub mod users;

pub use rounds::Entity as Rounds;
pub use rounds::Model as RoundRecord;
pub use users::Entity as Users;
pub use users::Model as User;
