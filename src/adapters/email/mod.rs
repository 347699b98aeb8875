//! Email delivery adapters.

mod resend;

pub use resend::ResendEmailSender;
