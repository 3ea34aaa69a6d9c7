pub mod memory;
pub mod registers;
