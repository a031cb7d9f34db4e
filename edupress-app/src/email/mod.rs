//! Outgoing account emails

pub mod console;

pub use console::ConsoleEmailSender;

/// Trait for sending account emails
pub trait EmailSender: Send + Sync {
    /// Send a password reset code to an email address
    fn send_password_reset(&self, email: &str, code: &str) -> Result<(), String>;
}

/// Allow using Box<dyn EmailSender> as an EmailSender
impl EmailSender for Box<dyn EmailSender> {
    fn send_password_reset(&self, email: &str, code: &str) -> Result<(), String> {
        (**self).send_password_reset(email, code)
    }
}
