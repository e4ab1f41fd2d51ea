pub mod feedback;
pub mod newsletters;
pub mod stories;
pub mod students;
pub mod toast;
