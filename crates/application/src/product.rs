//! Product service.

use common::{PagedResult, ProductId};
use domain::Product;
use storage::ProductRepository;

use crate::dto::{CreateProductRequest, ProductDto, UpdateProductRequest};
use crate::error::ServiceError;

/// Orchestrates product operations over a [`ProductRepository`].
pub struct ProductService<R> {
    repository: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a new service over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<ProductDto>, ServiceError> {
        let product = self.repository.get_by_id(id).await?;
        Ok(product.as_ref().map(ProductDto::from))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<ProductDto>, ServiceError> {
        let products = self.repository.get_all().await?;
        Ok(products.iter().map(ProductDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_paged(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult<ProductDto>, ServiceError> {
        let page = self.repository.get_paged(page_number, page_size).await?;
        Ok(page.map(|product| ProductDto::from(&product)))
    }

    /// Validates the request and persists a new product, returning its id.
    #[tracing::instrument(skip(self, request))]
    pub async fn create(&self, request: CreateProductRequest) -> Result<ProductId, ServiceError> {
        let product = Product::new(request.name, request.price)?;
        let id = self.repository.add(&product).await?;
        tracing::info!(%id, "product created");
        Ok(id)
    }

    /// Applies the update to an existing product. Returns false if the id
    /// is unknown.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> Result<bool, ServiceError> {
        let Some(mut product) = self.repository.get_by_id(id).await? else {
            return Ok(false);
        };
        product.update_name(request.name)?;
        product.update_price(request.price)?;
        Ok(self.repository.update(&product).await?)
    }

    /// Returns false if the id is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<bool, ServiceError> {
        Ok(self.repository.delete(id).await?)
    }
}
