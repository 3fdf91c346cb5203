//! Actor plumbing for in-process stores
//!
//! A store actor is a long-lived task that owns its state and processes
//! commands from an mpsc channel, answering over oneshot reply channels.

use std::fmt;
use tokio::sync::{mpsc, oneshot};

/// Marker for commands an actor accepts
pub trait ActorMessage: Send + 'static {}

/// Handle used to send commands to a running actor
pub struct ActorHandle<C: ActorMessage> {
    sender: mpsc::Sender<C>,
}

// Manual Clone implementation that doesn't require C: Clone
impl<C: ActorMessage> Clone for ActorHandle<C> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<C: ActorMessage> ActorHandle<C> {
    pub fn new(sender: mpsc::Sender<C>) -> Self {
        Self { sender }
    }

    /// Send a command to the actor
    pub async fn send(&self, cmd: C) -> Result<(), ActorError> {
        self.sender.send(cmd).await?;
        Ok(())
    }

    /// Check if the actor is still alive (channel not closed)
    pub fn is_alive(&self) -> bool {
        !self.sender.is_closed()
    }
}

impl<C: ActorMessage> fmt::Debug for ActorHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorHandle")
            .field("is_alive", &self.is_alive())
            .finish()
    }
}

/// Spawn an actor task and return its handle
///
/// Must be called from within a tokio runtime.
pub fn spawn_actor<C, F, Fut>(buffer_size: usize, actor_fn: F) -> ActorHandle<C>
where
    C: ActorMessage,
    F: FnOnce(mpsc::Receiver<C>) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(buffer_size);
    tokio::spawn(actor_fn(rx));
    ActorHandle::new(tx)
}

#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    #[error("Actor channel closed")]
    ChannelClosed,

    #[error("Actor dropped the reply")]
    NoReply,
}

impl From<oneshot::error::RecvError> for ActorError {
    fn from(_: oneshot::error::RecvError) -> Self {
        ActorError::NoReply
    }
}

impl<T> From<mpsc::error::SendError<T>> for ActorError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        ActorError::ChannelClosed
    }
}
