use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{cart::CartStorage, config::AppConfig};

const CART_LOCK_STRIPES: usize = 64;

/// Per-cart serialization of read-modify-write. Carts hash onto a fixed set
/// of async mutexes, so unrelated carts rarely wait on each other.
pub struct CartLocks {
    stripes: Vec<Arc<Mutex<()>>>,
}

impl CartLocks {
    pub fn new(stripes: usize) -> Self {
        Self {
            stripes: (0..stripes.max(1))
                .map(|_| Arc::new(Mutex::new(())))
                .collect(),
        }
    }

    /// The guard is owned so it can travel into a blocking task.
    pub async fn lock(&self, cart_id: Uuid) -> OwnedMutexGuard<()> {
        let index = (cart_id.as_u128() % self.stripes.len() as u128) as usize;
        self.stripes[index].clone().lock_owned().await
    }
}

impl Default for CartLocks {
    fn default() -> Self {
        Self::new(CART_LOCK_STRIPES)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub cart_storage: Arc<dyn CartStorage>,
    pub cart_locks: Arc<CartLocks>,
}

impl AppState {
    pub fn new(config: AppConfig, cart_storage: Arc<dyn CartStorage>) -> Self {
        Self {
            config: Arc::new(config),
            cart_storage,
            cart_locks: Arc::new(CartLocks::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_cart_waits_for_the_holder() {
        let locks = CartLocks::new(4);
        let cart_id = Uuid::new_v4();

        let held = locks.lock(cart_id).await;
        let waiting = tokio::time::timeout(Duration::from_millis(20), locks.lock(cart_id)).await;
        assert!(waiting.is_err());

        drop(held);
        let _again = locks.lock(cart_id).await;
    }

    #[tokio::test]
    async fn other_stripes_stay_available() {
        let locks = CartLocks::new(2);
        let first = Uuid::from_u128(0);
        let second = Uuid::from_u128(1);

        let _held = locks.lock(first).await;
        let other = tokio::time::timeout(Duration::from_millis(20), locks.lock(second)).await;
        assert!(other.is_ok());
    }
}
