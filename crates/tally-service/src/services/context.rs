//! Service context - dependency container for services
//!
//! Holds all repositories, the search indexer, and other dependencies needed by services.

use std::sync::Arc;

use tally_common::auth::JwtService;
use tally_core::traits::{
    ClientRepository, CompanyRepository, InvoiceLineItemRepository, ProjectRepository,
    TimesheetEntryRepository, UserRepository,
};
use tally_db::{
    PgClientRepository, PgCompanyRepository, PgInvoiceLineItemRepository, PgPool,
    PgProjectRepository, PgTimesheetEntryRepository, PgUserRepository,
};
use tally_search::{SearchIndexer, SharedRedisPool};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The search indexer
/// - JWT service for authentication
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool, absent with the in-memory search backend
    redis_pool: Option<SharedRedisPool>,

    // Repositories
    company_repo: Arc<dyn CompanyRepository>,
    user_repo: Arc<dyn UserRepository>,
    client_repo: Arc<dyn ClientRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    entry_repo: Arc<dyn TimesheetEntryRepository>,
    line_item_repo: Arc<dyn InvoiceLineItemRepository>,

    // Search
    search_indexer: SearchIndexer,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: Option<SharedRedisPool>,
        company_repo: Arc<dyn CompanyRepository>,
        user_repo: Arc<dyn UserRepository>,
        client_repo: Arc<dyn ClientRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        entry_repo: Arc<dyn TimesheetEntryRepository>,
        line_item_repo: Arc<dyn InvoiceLineItemRepository>,
        search_indexer: SearchIndexer,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            pool,
            redis_pool,
            company_repo,
            user_repo,
            client_repo,
            project_repo,
            entry_repo,
            line_item_repo,
            search_indexer,
            jwt_service,
        }
    }

    /// Context backed by the PostgreSQL repositories
    pub fn postgres(
        pool: PgPool,
        redis_pool: Option<SharedRedisPool>,
        search_indexer: SearchIndexer,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self::new(
            pool.clone(),
            redis_pool,
            Arc::new(PgCompanyRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgClientRepository::new(pool.clone())),
            Arc::new(PgProjectRepository::new(pool.clone())),
            Arc::new(PgTimesheetEntryRepository::new(pool.clone())),
            Arc::new(PgInvoiceLineItemRepository::new(pool)),
            search_indexer,
            jwt_service,
        )
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool, if one is configured
    pub fn redis_pool(&self) -> Option<&SharedRedisPool> {
        self.redis_pool.as_ref()
    }

    // === Repositories ===

    pub fn company_repo(&self) -> &dyn CompanyRepository {
        self.company_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn client_repo(&self) -> &dyn ClientRepository {
        self.client_repo.as_ref()
    }

    pub fn project_repo(&self) -> &dyn ProjectRepository {
        self.project_repo.as_ref()
    }

    pub fn entry_repo(&self) -> &dyn TimesheetEntryRepository {
        self.entry_repo.as_ref()
    }

    pub fn line_item_repo(&self) -> &dyn InvoiceLineItemRepository {
        self.line_item_repo.as_ref()
    }

    // === Search ===

    /// Get the fire-and-forget search indexer
    pub fn search_indexer(&self) -> &SearchIndexer {
        &self.search_indexer
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &self.redis_pool.is_some())
            .field("repositories", &"...")
            .field("search_indexer", &self.search_indexer)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom repositories
///
/// Repositories left unset fall back to the PostgreSQL implementations.
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    company_repo: Option<Arc<dyn CompanyRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    client_repo: Option<Arc<dyn ClientRepository>>,
    project_repo: Option<Arc<dyn ProjectRepository>>,
    entry_repo: Option<Arc<dyn TimesheetEntryRepository>>,
    line_item_repo: Option<Arc<dyn InvoiceLineItemRepository>>,
    search_indexer: Option<SearchIndexer>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn company_repo(mut self, repo: Arc<dyn CompanyRepository>) -> Self {
        self.company_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn client_repo(mut self, repo: Arc<dyn ClientRepository>) -> Self {
        self.client_repo = Some(repo);
        self
    }

    pub fn project_repo(mut self, repo: Arc<dyn ProjectRepository>) -> Self {
        self.project_repo = Some(repo);
        self
    }

    pub fn entry_repo(mut self, repo: Arc<dyn TimesheetEntryRepository>) -> Self {
        self.entry_repo = Some(repo);
        self
    }

    pub fn line_item_repo(mut self, repo: Arc<dyn InvoiceLineItemRepository>) -> Self {
        self.line_item_repo = Some(repo);
        self
    }

    pub fn search_indexer(mut self, indexer: SearchIndexer) -> Self {
        self.search_indexer = Some(indexer);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the pool, search indexer or JWT
    /// service is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let pool = self
            .pool
            .ok_or_else(|| ServiceError::validation("pool is required"))?;
        let search_indexer = self
            .search_indexer
            .ok_or_else(|| ServiceError::validation("search_indexer is required"))?;
        let jwt_service = self
            .jwt_service
            .ok_or_else(|| ServiceError::validation("jwt_service is required"))?;

        Ok(ServiceContext::new(
            pool.clone(),
            self.redis_pool,
            self.company_repo
                .unwrap_or_else(|| Arc::new(PgCompanyRepository::new(pool.clone()))),
            self.user_repo
                .unwrap_or_else(|| Arc::new(PgUserRepository::new(pool.clone()))),
            self.client_repo
                .unwrap_or_else(|| Arc::new(PgClientRepository::new(pool.clone()))),
            self.project_repo
                .unwrap_or_else(|| Arc::new(PgProjectRepository::new(pool.clone()))),
            self.entry_repo
                .unwrap_or_else(|| Arc::new(PgTimesheetEntryRepository::new(pool.clone()))),
            self.line_item_repo
                .unwrap_or_else(|| Arc::new(PgInvoiceLineItemRepository::new(pool.clone()))),
            search_indexer,
            jwt_service,
        ))
    }
}
