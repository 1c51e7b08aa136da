use scriptvocab_types::AuthUser;
use tokio::sync::watch;

/// Source of authentication state changes
pub trait AuthProvider: Send + Sync {
    /// Subscribe to identity changes. The current identity is delivered
    /// first; dropping the subscription unsubscribes.
    fn subscribe(&self) -> AuthSubscription;
}

/// Stream of identity changes from an [`AuthProvider`]
pub struct AuthSubscription {
    rx: watch::Receiver<Option<AuthUser>>,
    primed: bool,
}

impl AuthSubscription {
    pub fn new(rx: watch::Receiver<Option<AuthUser>>) -> Self {
        Self { rx, primed: false }
    }

    /// Wait for the next identity. Returns `None` once the provider is gone.
    pub async fn next(&mut self) -> Option<Option<AuthUser>> {
        if self.primed {
            self.rx.changed().await.ok()?;
        }
        self.primed = true;

        Some(self.rx.borrow_and_update().clone())
    }
}

/// In-process auth provider holding the signed-in identity
pub struct SessionAuth {
    tx: watch::Sender<Option<AuthUser>>,
}

impl SessionAuth {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    pub fn sign_in(&self, user: AuthUser) {
        tracing::info!("Signed in as {}", user.uid);
        self.tx.send_replace(Some(user));
    }

    pub fn sign_out(&self) {
        if self.tx.send_replace(None).is_some() {
            tracing::info!("Signed out");
        }
    }

    pub fn current(&self) -> Option<AuthUser> {
        self.tx.borrow().clone()
    }
}

impl Default for SessionAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for SessionAuth {
    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.tx.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn subscription_yields_current_state_first() {
        let auth = SessionAuth::new();
        auth.sign_in(AuthUser::new("alice"));

        let mut sub = auth.subscribe();
        let first = sub.next().await.unwrap();
        assert_eq!(first.unwrap().uid.as_str(), "alice");
    }

    #[tokio::test]
    async fn subscription_sees_sign_out() {
        let auth = SessionAuth::new();
        let mut sub = auth.subscribe();
        assert_eq!(sub.next().await, Some(None));

        auth.sign_in(AuthUser::new("bob"));
        let next = timeout(Duration::from_secs(1), sub.next()).await.unwrap();
        assert_eq!(next.unwrap().unwrap().uid.as_str(), "bob");

        auth.sign_out();
        let next = timeout(Duration::from_secs(1), sub.next()).await.unwrap();
        assert_eq!(next, Some(None));
        assert_eq!(auth.current(), None);
    }

    #[tokio::test]
    async fn subscription_ends_with_provider() {
        let auth = SessionAuth::new();
        let mut sub = auth.subscribe();
        sub.next().await;

        drop(auth);
        assert_eq!(sub.next().await, None);
    }
}
