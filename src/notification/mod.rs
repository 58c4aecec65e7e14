pub mod compose;
pub mod resend;
