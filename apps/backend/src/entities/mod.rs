pub mod students;
pub mod teachers;
pub mod users;

pub use students::Entity as Students;
pub use students::Model as Student;
pub use teachers::Entity as Teachers;
pub use teachers::Model as Teacher;
pub use users::Entity as Users;
pub use users::Model as User;
