mod home;
pub use home::Home;

mod subject;
pub use subject::Subject;
