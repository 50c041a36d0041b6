use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_ldap::*;
use crate::infra_memory::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::{self, Settings};
use anyhow::anyhow;
use std::sync::Arc;
use std::time::Duration;

pub struct Server {
    pub identity_service: Arc<dyn IdentityService>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let resolver: Arc<dyn IdentityService> = match settings.identity.backend.as_str() {
            "fake" => Arc::new(FakeIdentityService::new()),
            "real" => {
                let directory: Arc<dyn Directory> =
                    Arc::new(LdapDirectory::new(ldap_config(&settings.directory)));
                Arc::new(DirectoryIdentityService::new(
                    directory,
                    settings.directory.queries.clone(),
                ))
            }
            other => return Err(anyhow!("Unknown identity backend: {}", other)),
        };

        let cache = identity_cache(&settings.cache).await?;
        let identity_service = Arc::new(CachingIdentityService::new(cache, resolver));

        info!(
            identity = %settings.identity.backend,
            cache = %settings.cache.backend,
            "server started"
        );

        Ok(Self::from_service(identity_service))
    }

    pub fn from_service(identity_service: Arc<dyn IdentityService>) -> Self {
        Self { identity_service }
    }
}

fn ldap_config(directory: &settings::Directory) -> LdapConfig {
    LdapConfig {
        url: directory.url.clone(),
        bind_dn: directory.bind_dn.clone(),
        bind_password: directory.bind_password.clone(),
        timeout: Duration::from_secs(directory.timeout_secs),
        starttls: directory.starttls,
    }
}

async fn identity_cache(cache: &settings::Cache) -> anyhow::Result<Arc<dyn IdentityCache>> {
    match cache.backend.as_str() {
        "memory" => Ok(Arc::new(MemoryIdentityCache::new(
            cache.ttl_secs.map(Duration::from_secs),
        ))),
        "redis" => {
            let url = cache
                .redis_url
                .as_deref()
                .ok_or_else(|| anyhow!("cache.redis_url is required by the redis backend"))?;
            let redis_client = redis::Client::open(url)?;
            let redis_manager = redis_client.get_connection_manager().await?;
            Ok(Arc::new(RedisIdentityCache::new(
                redis_manager,
                cache.prefix.clone(),
                cache.ttl_secs,
            )))
        }
        other => Err(anyhow!("Unknown cache backend: {}", other)),
    }
}
