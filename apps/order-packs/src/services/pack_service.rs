//! Pack catalog service.

use tracing::info;

use packs_core::validation::validate_pack_sizes;
use packs_core::PackSize;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::store::PackStore;

/// Reads and replaces the pack catalog.
#[derive(Debug, Clone)]
pub struct PackService<P> {
    packs: P,
    max_pack_sizes: usize,
    max_pack_size: u32,
}

impl<P: PackStore> PackService<P> {
    /// Create a new pack service.
    pub fn new(packs: P, config: &AppConfig) -> Self {
        PackService {
            packs,
            max_pack_sizes: config.max_pack_sizes,
            max_pack_size: config.max_pack_size,
        }
    }

    /// The underlying store, for handing to `OrderService::place_order`.
    pub fn store(&self) -> &P {
        &self.packs
    }

    /// Current catalog, ascending by size.
    pub async fn get_packs(&self) -> AppResult<Vec<PackSize>> {
        Ok(self.packs.list_packs().await?)
    }

    /// Validates `raw` and replaces the catalog with it.
    ///
    /// Returns the stored catalog (sorted, deduplicated).
    pub async fn save_packs(&self, raw: &[i64]) -> AppResult<Vec<PackSize>> {
        let sizes = validate_pack_sizes(raw, self.max_pack_sizes, self.max_pack_size)?;

        self.packs.replace_packs(&sizes).await?;

        info!(sizes = ?sizes, "Pack catalog replaced");
        Ok(sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::store::mock::MemoryPacks;

    fn sizes(raw: &[u32]) -> Vec<PackSize> {
        raw.iter().filter_map(|&s| PackSize::new(s)).collect()
    }

    #[tokio::test]
    async fn test_get_packs() {
        let svc = PackService::new(MemoryPacks::with_sizes(&[500, 250]), &AppConfig::default());
        assert_eq!(svc.get_packs().await.unwrap(), sizes(&[250, 500]));
    }

    #[tokio::test]
    async fn test_save_packs_canonicalizes() {
        let svc = PackService::new(MemoryPacks::default(), &AppConfig::default());

        let saved = svc.save_packs(&[53, 23, 31, 23]).await.unwrap();
        assert_eq!(saved, sizes(&[23, 31, 53]));
        assert_eq!(svc.get_packs().await.unwrap(), sizes(&[23, 31, 53]));
    }

    #[tokio::test]
    async fn test_save_packs_rejects_invalid_input() {
        let config = AppConfig {
            max_pack_sizes: 2,
            ..AppConfig::default()
        };
        let svc = PackService::new(MemoryPacks::with_sizes(&[250]), &config);

        let cases: [&[i64]; 4] = [&[], &[250, 0], &[-5], &[1, 2, 3]];
        for raw in cases {
            let err = svc.save_packs(raw).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::ValidationError);
        }

        // Rejected input leaves the catalog untouched.
        assert_eq!(svc.get_packs().await.unwrap(), sizes(&[250]));
    }

    #[tokio::test]
    async fn test_save_packs_rejects_oversized_pack() {
        let config = AppConfig {
            max_pack_size: 5000,
            ..AppConfig::default()
        };
        let svc = PackService::new(MemoryPacks::with_sizes(&[250]), &config);

        let err = svc.save_packs(&[4_000_000_000]).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);

        let limit = i64::from(config.max_pack_size);
        assert!(svc.save_packs(&[limit]).await.is_ok());
        assert!(svc.save_packs(&[limit + 1]).await.is_err());
        assert_eq!(svc.get_packs().await.unwrap(), sizes(&[config.max_pack_size]));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let svc = PackService::new(MemoryPacks::failing(), &AppConfig::default());

        assert_eq!(
            svc.get_packs().await.unwrap_err().code(),
            ErrorCode::DatabaseError
        );
        assert_eq!(
            svc.save_packs(&[250]).await.unwrap_err().code(),
            ErrorCode::DatabaseError
        );
    }
}
