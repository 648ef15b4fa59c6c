//! Console code sender for development

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use vg_core::CodeSender;
use vg_shared::email::mask_email;

/// Prints codes to the console instead of emailing them
#[derive(Clone)]
pub struct LogCodeSender {
    /// Counter for tracking number of messages "sent"
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl LogCodeSender {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for LogCodeSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeSender for LogCodeSender {
    async fn send_code(&self, recipient: &str, code: &str) -> Result<String, String> {
        if self.simulate_failure {
            warn!(
                "Console sender simulating failure for {}",
                mask_email(recipient)
            );
            return Err("Simulated email delivery failure".to_string());
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("CONSOLE EMAIL SENDER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", recipient);
            println!("Message ID: {}", message_id);
            println!("Code: {}", code);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "email_service",
            provider = "console",
            recipient = %mask_email(recipient),
            message_id = %message_id,
            "Verification email logged (console)"
        );

        Ok(message_id)
    }
}
