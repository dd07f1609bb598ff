pub mod dir;
pub mod marker;
pub mod rw;
