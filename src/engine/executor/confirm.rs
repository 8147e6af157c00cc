//! Confirmation prompt for destructive intents

use async_trait::async_trait;

/// Asks the user a yes/no question.
///
/// The executor awaits this before running a confirmation-gated intent;
/// nothing else in the session progresses until it returns.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way (scripts, tests, `--assume-yes`)
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl ConfirmationPrompt for AutoConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!("Auto-answering {:?} with {}", prompt, self.0);
        self.0
    }
}
