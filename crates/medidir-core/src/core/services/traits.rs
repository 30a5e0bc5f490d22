use crate::api::filters::{Filters, ReferenceList};
use crate::api::models::Page;
use crate::core::services::reference_service::FilterOptions;
use crate::core::services::types::ServiceError;
use async_trait::async_trait;

/// Fetches one page of a filterable list.
#[async_trait]
pub trait PageFetcher<T, F: Filters>: Send + Sync {
    /// `page` is 0-based.
    async fn fetch_page(&self, page: u32, size: u32, filters: &F)
    -> Result<Page<T>, ServiceError>;
}

/// Retrieves a single entity for a detail view.
#[async_trait]
pub trait GetService<T>: Send + Sync {
    /// Singular display name of the resource, e.g. "Hospital".
    fn resource_name(&self) -> &'static str;

    async fn get(&self, id: u64) -> Result<T, ServiceError>;
}

/// Fetches one page of a list that hangs off a parent entity.
#[async_trait]
pub trait SubListFetcher<T>: Send + Sync {
    async fn fetch_sub_page(
        &self,
        parent_id: u64,
        page: u32,
        size: u32,
    ) -> Result<Page<T>, ServiceError>;
}

/// Loads the reference lists behind filter dropdowns.
#[async_trait]
pub trait OptionsSource: Send + Sync {
    /// Never fails as a whole; lists that could not be loaded are reported
    /// in [`FilterOptions::failed`].
    async fn load_options(&self, lists: &[ReferenceList]) -> FilterOptions;
}

/// Implements [`SubListFetcher`] for a newtype over the client whose
/// fetcher method has the `(parent_id, page, size)` shape.
#[macro_export]
macro_rules! sub_list_fetcher {
    ($(#[$meta:meta])* $name:ident, $item:ty, $method:ident) => {
        $(#[$meta])*
        pub struct $name {
            client: std::sync::Arc<$crate::api::client::DirectoryClient>,
        }

        impl $name {
            pub fn new(client: std::sync::Arc<$crate::api::client::DirectoryClient>) -> Self {
                Self { client }
            }
        }

        #[async_trait::async_trait]
        impl $crate::core::services::traits::SubListFetcher<$item> for $name {
            async fn fetch_sub_page(
                &self,
                parent_id: u64,
                page: u32,
                size: u32,
            ) -> Result<
                $crate::api::models::Page<$item>,
                $crate::core::services::types::ServiceError,
            > {
                Ok(self.client.$method(parent_id, page, size).await?)
            }
        }
    };
}
