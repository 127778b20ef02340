pub mod course_store;
pub mod storage;
