pub mod pbl_review1;
pub mod pbl_review2;
pub mod pbl_review3;
