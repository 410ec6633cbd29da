use model::waypoint::Waypoint;
use tokio::sync::mpsc;
use utility::id::Id;

/// A human readable message about a waypoint, meant for transient display.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub waypoint_id: Id<Waypoint>,
    pub message: String,
}

impl Notification {
    pub fn new<S: Into<String>>(waypoint_id: Id<Waypoint>, message: S) -> Self {
        Self {
            waypoint_id,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notifier(mpsc::UnboundedSender<Notification>);

impl Notifier {
    /// A notifier nobody listens to.
    pub fn discarding() -> Self {
        let (notifier, _) = channel();
        notifier
    }

    pub fn notify(&self, notification: Notification) {
        if let Err(why) = self.0.send(notification) {
            log::trace!("dropping notification, nobody is listening: {:?}", why.0);
        }
    }
}

#[derive(Debug)]
pub struct Notifications(mpsc::UnboundedReceiver<Notification>);

impl Notifications {
    /// Waits for the next notification. Returns `None` once every notifier
    /// is gone and all notifications have been received.
    pub async fn recv(&mut self) -> Option<Notification> {
        self.0.recv().await
    }

    /// Takes all notifications that are already waiting.
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut notifications = Vec::new();
        while let Ok(notification) = self.0.try_recv() {
            notifications.push(notification);
        }
        notifications
    }
}

pub fn channel() -> (Notifier, Notifications) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Notifier(tx), Notifications(rx))
}
