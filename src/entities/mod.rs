//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod product;
pub mod question;
pub mod report;
pub mod user;

// Re-export specific types to avoid conflicts
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use question::{Column as QuestionColumn, Entity as Question, Model as QuestionModel};
pub use report::{Column as ReportColumn, Entity as Report, Model as ReportModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
