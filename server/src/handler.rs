use std::ops::Deref;
use std::sync::Arc;

use vodca::References;

use driver::database::{MemoryRepository, SqliteDatabase, SqliteRepository};
use driver::importer::{populate, PopulationStrategy, SourceFiles};
use kernel::interface::repository::{DependOnRepository, Repository};
use kernel::KernelError;

use crate::config::{Config, RepositoryKind};

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new(config: &Config) -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init(config).await?)))
    }

    #[cfg(test)]
    pub fn with_repository(repository: impl Repository) -> Self {
        Self(Arc::new(Handler {
            kind: RepositoryKind::Memory,
            repository: Box::new(repository),
        }))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

impl DependOnRepository for AppModule {
    type Repository = dyn Repository;
    fn repository(&self) -> &Self::Repository {
        self.0.repository.as_ref()
    }
}

/// The backend is chosen once here and shared by every request.
#[derive(References)]
pub struct Handler {
    kind: RepositoryKind,
    repository: Box<dyn Repository>,
}

impl Handler {
    pub async fn init(config: &Config) -> error_stack::Result<Self, KernelError> {
        let files = SourceFiles::from_dir(&config.data_path);
        let repository: Box<dyn Repository> = match config.repository {
            RepositoryKind::Memory => {
                let repository = MemoryRepository::new();
                populate(&repository, &files, PopulationStrategy::Transient).await?;
                Box::new(repository)
            }
            RepositoryKind::Database => {
                let db = SqliteDatabase::connect(&config.database_url).await?;
                let repository = SqliteRepository::new(db);
                if config.testing || repository.is_empty().await? {
                    repository.clear().await?;
                    populate(&repository, &files, PopulationStrategy::Persistent).await?;
                } else {
                    tracing::info!("reusing the catalog in {}", config.database_url);
                }
                Box::new(repository)
            }
        };
        Ok(Self {
            kind: config.repository,
            repository,
        })
    }
}
