//! Intent handler trait

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{CommandResult, ParsedCommand};

/// Performs the side effect behind one intent (moving a window, changing the
/// volume, running a shortcut, ...).
///
/// Handlers are the only place OS-specific code lives. An `Err` is reported
/// as a failed step; the engine never retries.
#[async_trait]
pub trait IntentHandler: Send + Sync {
    async fn handle(&self, command: &ParsedCommand) -> Result<CommandResult>;
}

/// Adapter turning an async closure into an [`IntentHandler`]
pub struct FnHandler<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> IntentHandler for FnHandler<F>
where
    F: Fn(ParsedCommand) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<CommandResult>> + Send + 'static,
{
    async fn handle(&self, command: &ParsedCommand) -> Result<CommandResult> {
        (self.f)(command.clone()).await
    }
}

/// Wrap an async closure as a shareable handler.
///
/// ```rust,ignore
/// registry.register_handler(
///     CommandIntent::VolumeUp,
///     handler_fn(|_cmd| async { Ok(CommandResult::success("Volume up")) }),
/// );
/// ```
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn IntentHandler>
where
    F: Fn(ParsedCommand) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<CommandResult>> + Send + 'static,
{
    Arc::new(FnHandler { f })
}
