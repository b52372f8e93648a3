//! Customer service.

use common::{CustomerId, PagedResult};
use domain::{Customer, Email};
use storage::CustomerRepository;

use crate::dto::{CreateCustomerRequest, CustomerDto, UpdateCustomerRequest};
use crate::error::ServiceError;

/// Orchestrates customer operations over a [`CustomerRepository`].
pub struct CustomerService<R> {
    repository: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a new service over the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<CustomerDto>, ServiceError> {
        let customer = self.repository.get_by_id(id).await?;
        Ok(customer.as_ref().map(CustomerDto::from))
    }

    #[tracing::instrument(skip(self, email))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<CustomerDto>, ServiceError> {
        let customer = self.repository.get_by_email(email).await?;
        Ok(customer.as_ref().map(CustomerDto::from))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<CustomerDto>, ServiceError> {
        let customers = self.repository.get_all().await?;
        Ok(customers.iter().map(CustomerDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_paged(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<PagedResult<CustomerDto>, ServiceError> {
        let page = self.repository.get_paged(page_number, page_size).await?;
        Ok(page.map(|customer| CustomerDto::from(&customer)))
    }

    /// Validates the request and persists a new customer, returning its id.
    #[tracing::instrument(skip(self, request))]
    pub async fn create(&self, request: CreateCustomerRequest) -> Result<CustomerId, ServiceError> {
        let email = Email::new(request.email)?;
        let customer = Customer::new(request.name, email)?;
        let id = self.repository.add(&customer).await?;
        tracing::info!(%id, "customer created");
        Ok(id)
    }

    /// Applies the update to an existing customer. Returns false if the id
    /// is unknown.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: CustomerId,
        request: UpdateCustomerRequest,
    ) -> Result<bool, ServiceError> {
        let Some(mut customer) = self.repository.get_by_id(id).await? else {
            return Ok(false);
        };
        customer.update_name(request.name)?;
        customer.update_email(Email::new(request.email)?);
        Ok(self.repository.update(&customer).await?)
    }

    /// Returns false if the id is unknown.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: CustomerId) -> Result<bool, ServiceError> {
        Ok(self.repository.delete(id).await?)
    }
}
