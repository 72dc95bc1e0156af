mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod tasks;
pub use tasks::Tasks;
